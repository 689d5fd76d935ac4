pub mod auth;
pub mod record;
