//! Convention-dispatch admin API.
//!
//! A CRUD administrative backend (users, user groups, job records) whose
//! REST surface is routed by convention instead of a hand-written route
//! table: the dispatcher derives a controller name and action from the URL
//! shape and HTTP verb, registers the dynamic route, and hands the request
//! to a handler bound at startup.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!        │  Accept guard / base path
//!        ▼
//!   ┌──────────┐    ┌───────────┐    ┌─────────────┐    ┌──────────┐
//!   │   http   │───▶│ dispatch  │───▶│ controllers │───▶│ services │
//!   │  server  │    │ (resolve, │    │ (registry   │    │ groups / │
//!   │ fallback │    │ register) │    │  lookup)    │    │ users /  │
//!   └──────────┘    └───────────┘    └─────────────┘    │ jobs     │
//!                                                       └────┬─────┘
//!                   Cross-cutting: config (hot reload),      │
//!                   audit traces, observability, lifecycle   ▼
//!                                                       narrow stores
//! ```

// Core subsystems
pub mod config;
pub mod controllers;
pub mod dispatch;
pub mod http;

// Domain services
pub mod audit;
pub mod groups;
pub mod jobs;
pub mod paging;
pub mod users;

// Cross-cutting concerns
pub mod admin;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
