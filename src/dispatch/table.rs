//! Dynamic route registration.
//!
//! The original mutated the framework's route table on every qualifying
//! request. That becomes an explicit, injectable sink here: the dispatcher
//! registers each resolved `(method, template, controller#action)` tuple,
//! and the concrete table is append-only and safe under concurrent requests
//! racing to register equivalent shapes. The table is what makes the
//! implicit routing convention inspectable (see the admin surface).

use dashmap::DashMap;
use serde::Serialize;

use crate::dispatch::resolver::{Action, Dispatch};

/// One dynamically registered route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegisteredRoute {
    pub method: String,
    pub template: String,
    pub controller: String,
    pub action: Action,
}

impl RegisteredRoute {
    pub fn from_dispatch(method: &axum::http::Method, dispatch: &Dispatch) -> Self {
        Self {
            method: method.to_string(),
            template: dispatch.shape.template(),
            controller: dispatch.controller.to_string(),
            action: dispatch.action,
        }
    }
}

/// Capability to accept route registrations.
pub trait RouteSink: Send + Sync {
    fn register(&self, route: RegisteredRoute);
}

/// Concurrency-safe route table keyed by `(method, template)`.
///
/// Re-registering an equivalent shape overwrites in place, so repeated
/// requests neither error nor grow the table.
#[derive(Default)]
pub struct RouteTable {
    routes: DashMap<(String, String), RegisteredRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered routes, ordered by template then method for stable
    /// listings.
    pub fn snapshot(&self) -> Vec<RegisteredRoute> {
        let mut routes: Vec<RegisteredRoute> =
            self.routes.iter().map(|e| e.value().clone()).collect();
        routes.sort_by(|a, b| (&a.template, &a.method).cmp(&(&b.template, &b.method)));
        routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteSink for RouteTable {
    fn register(&self, route: RegisteredRoute) {
        let key = (route.method.clone(), route.template.clone());
        self.routes.insert(key, route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(method: &str, template: &str) -> RegisteredRoute {
        RegisteredRoute {
            method: method.into(),
            template: template.into(),
            controller: "User::GroupController".into(),
            action: Action::Search,
        }
    }

    #[test]
    fn equivalent_shapes_register_once() {
        let table = RouteTable::new();
        table.register(route("GET", "/user/group"));
        table.register(route("GET", "/user/group"));
        table.register(route("POST", "/user/group"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn snapshot_is_ordered() {
        let table = RouteTable::new();
        table.register(route("POST", "/user/group"));
        table.register(route("GET", "/job/job"));
        table.register(route("GET", "/user/group"));

        let templates: Vec<(String, String)> = table
            .snapshot()
            .into_iter()
            .map(|r| (r.template, r.method))
            .collect();
        assert_eq!(
            templates,
            vec![
                ("/job/job".to_string(), "GET".to_string()),
                ("/user/group".to_string(), "GET".to_string()),
                ("/user/group".to_string(), "POST".to_string()),
            ]
        );
    }
}
