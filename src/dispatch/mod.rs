//! Convention dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path+query, Accept header)
//!     → resolver.rs (activation guard, then segment.rs for the template)
//!     → Dispatch { controller name, action, route shape }
//!     → table.rs (register the dynamic route, append-only)
//!     → registry.rs (controller lookup by derived name)
//!     → controller runs the action
//! ```
//!
//! # Design Decisions
//! - One registration per qualifying request shape; equivalent shapes
//!   coalesce in the table, and registration is race-safe
//! - Handlers are bound at startup; no runtime string-to-type resolution
//! - Every decline path (guard, empty path, unknown verb) is silent

pub mod registry;
pub mod resolver;
pub mod segment;
pub mod table;

pub use registry::{ActionContext, Controller, HandlerRegistry};
pub use resolver::{Action, ControllerName, Dispatch, Dispatcher};
pub use segment::{RouteShape, SegmentRules, TemplateSegment};
pub use table::{RegisteredRoute, RouteSink, RouteTable};
