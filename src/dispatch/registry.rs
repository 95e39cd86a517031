//! Handler registry: derived controller name → handler.
//!
//! The original convention built a class name string and instantiated it at
//! runtime. Here the mapping is explicit: handlers are registered at startup
//! under the same name the dispatcher derives per request, and looked up by
//! that key. A miss is an ordinary not-found at the host routing layer, not
//! a dispatcher error.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::dispatch::resolver::{Action, ControllerName};
use crate::http::response::{ApiError, ApiResponse};

/// Request-scoped inputs handed to a controller action.
///
/// `params` are the raw values captured for the placeholder slots, in
/// placeholder order. The actor id stands in for the session user the
/// original stamped onto records; it carries no authentication semantics.
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub params: Vec<String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub actor: u64,
}

impl ActionContext {
    /// The target record id: first placeholder value, falling back to the
    /// `id` query parameter (the original accepted `DELETE ...?id=1`).
    pub fn record_id(&self) -> Result<u64, ApiError> {
        let raw = self
            .params
            .first()
            .map(String::as_str)
            .or_else(|| self.query.get("id").map(String::as_str))
            .ok_or_else(|| ApiError::Invalid("missing record id".into()))?;
        raw.parse()
            .map_err(|_| ApiError::Invalid(format!("invalid record id: {raw}")))
    }

    /// The JSON request body, required for write actions.
    pub fn payload(&self) -> Result<&Value, ApiError> {
        self.body.as_ref().ok_or(ApiError::BadBody)
    }
}

/// A convention handler. One implementor per resource; the action selects
/// which operation runs.
pub trait Controller: Send + Sync {
    fn handle(&self, action: Action, ctx: ActionContext) -> Result<ApiResponse, ApiError>;
}

/// Startup-populated mapping from controller name to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<ControllerName, Arc<dyn Controller>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under the name derived from the given literal
    /// segments, exactly as the dispatcher would derive it at request time.
    pub fn register(&self, literals: &[&str], handler: Arc<dyn Controller>) {
        if let Some(name) = ControllerName::from_literals(literals.iter().copied()) {
            tracing::debug!(controller = %name, "Handler registered");
            self.handlers.insert(name, handler);
        }
    }

    pub fn get(&self, name: &ControllerName) -> Option<Arc<dyn Controller>> {
        self.handlers.get(name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Controller for Probe {
        fn handle(&self, action: Action, _ctx: ActionContext) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::ok(serde_json::json!(action.as_str())))
        }
    }

    #[test]
    fn lookup_uses_the_derived_name() {
        let registry = HandlerRegistry::new();
        registry.register(&["user", "group"], Arc::new(Probe));

        let name = ControllerName::from_literals(["user", "group"]).expect("name");
        assert_eq!(name.as_str(), "User::GroupController");
        assert!(registry.get(&name).is_some());

        let other = ControllerName::from_literals(["user", "role"]).expect("name");
        assert!(registry.get(&other).is_none());
    }

    #[test]
    fn record_id_prefers_path_param_over_query() {
        let mut ctx = ActionContext::default();
        ctx.query.insert("id".into(), "9".into());
        assert_eq!(ctx.record_id().expect("id"), 9);

        ctx.params.push("5".into());
        assert_eq!(ctx.record_id().expect("id"), 5);
    }

    #[test]
    fn record_id_missing_is_invalid() {
        let ctx = ActionContext::default();
        assert!(ctx.record_id().is_err());
    }
}
