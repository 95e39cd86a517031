//! Generic job record store.

pub mod record;
pub mod service;
pub mod store;

pub use record::{JobRecord, NewJob};
pub use service::JobService;
pub use store::{JobStore, MemoryJobStore};
