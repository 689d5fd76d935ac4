pub mod mailer;

pub use mailer::{MailerApi, OutboundEmail};
