//! User-group management.
//!
//! # Data Flow
//! ```text
//! controller action
//!     → service.rs (validation scene, uniqueness, actor stamping, traces)
//!     → store.rs (narrow persistence interface)
//! ```
//!
//! # Design Decisions
//! - Persistence hides behind `GroupStore`; the in-memory implementation is
//!   the only one shipped
//! - Updates may touch only `name` and `rules`; audit stamps always move

pub mod service;
pub mod store;
pub mod validator;

pub use service::GroupService;
pub use store::{GroupRecord, GroupStore, MemoryGroupStore, NewGroup};
