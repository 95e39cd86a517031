//! User management. Mirrors the group module's service/store split.

pub mod service;
pub mod store;

pub use service::UserService;
pub use store::{MemoryUserStore, NewUser, UserRecord, UserStore};
