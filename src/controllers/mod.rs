//! Convention controllers.
//!
//! Each controller owns one resource and is registered under the name the
//! dispatcher derives from that resource's path:
//!
//! - `/api/user/user`  → `User::UserController`
//! - `/api/user/group` → `User::GroupController`
//! - `/api/job/job`    → `Job::JobController`

pub mod group;
pub mod job;
pub mod user;

pub use group::GroupController;
pub use job::JobController;
pub use user::UserController;
