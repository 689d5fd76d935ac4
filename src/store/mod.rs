//! Record store: the singleton email record and its remote adapter.
//!
//! Layout:
//! - `models.rs`: the `EmailRecord` row and its documented fallbacks
//! - `supabase.rs`: PostgREST adapter (load / upsert / mark-sent)

pub mod models;
pub mod supabase;

pub use models::{EmailRecord, SaveFields};
pub use supabase::RecordStore;
