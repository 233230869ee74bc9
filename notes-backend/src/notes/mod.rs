//! Notes system — in-memory note collection with a JSON file mirror
//!
//! The store owns the collection and its persistence file; the service
//! implements list/create/get/update/remove on top of it.

pub mod error;
pub mod file_ops;
pub mod query;
pub mod service;
pub mod store;

pub use error::NoteError;
pub use query::{ListQuery, RawListQuery};
pub use service::{NoteChanges, NoteService};
pub use store::NoteStore;
