pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod service;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::TideError;
pub use store::{EmailRecord, RecordStore};
