//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup: load config → validate → build state → bind listener → serve
//! Shutdown: SIGINT → broadcast → stop accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
