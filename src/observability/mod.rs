//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (dispatch counters, Prometheus endpoint)
//!
//! The request id set in the HTTP layer correlates both.
//! ```

pub mod logging;
pub mod metrics;
