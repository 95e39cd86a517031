//! Configuration schema definitions.
//!
//! All sections default so a minimal (or absent) config file still yields a
//! runnable service. Serde handles the syntactic layer; semantic checks live
//! in `validation.rs`.

use serde::{Deserialize, Serialize};

/// Root configuration for the admin API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Convention-dispatch guard and classification settings.
    pub dispatch: DispatchConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Search pagination bounds.
    pub pagination: PaginationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin inspection surface.
    pub admin: AdminConfig,

    /// Audit trace retention.
    pub audit: AuditConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g. "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Convention-dispatch settings.
///
/// `api_accept` is the activation guard: only requests whose `Accept`
/// header equals this value are dispatched by convention. The exact value
/// is deployment configuration, not part of the mechanism's contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Expected `Accept` header value for convention dispatch.
    pub api_accept: String,

    /// Path prefix carrying the API surface; stripped before segmenting.
    pub base_path: String,

    /// Prefix marking a non-numeric segment as a parameter slot.
    /// Empty disables the secondary rule (digits always qualify).
    pub param_marker: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            api_accept: "application/vnd.admin.v1+json".to_string(),
            base_path: "/api".to_string(),
            param_marker: "params:".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Pagination bounds for search endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when the client sends no `limit`.
    pub default_limit: usize,

    /// Hard ceiling on the page size.
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin inspection surface settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount `/admin/*` endpoints on the main router.
    pub enabled: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Audit trace retention.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// In-memory ring capacity for recent traces.
    pub recent_capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            recent_capacity: 512,
        }
    }
}
