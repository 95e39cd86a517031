//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, state)
//!     → explicit routes (admin) or the dispatch fallback
//!     → response.rs (envelope, error mapping)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, ApiResponse};
pub use server::{AppState, HttpServer};
