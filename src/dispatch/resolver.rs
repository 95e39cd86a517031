//! Convention-based resolution of a request to a controller and action.
//!
//! # Data Flow
//! ```text
//! (method, raw path+query, Accept header)
//!     → activation guard (Accept value, API base path)
//!     → segment.rs (template + placeholders)
//!     → controller name from literals, action from verb
//!     → Dispatch { controller, action, shape }  or  None (no participation)
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function of the request; nothing global is read
//! - Declining is always silent: guard mismatch, empty path, unknown verb
//!   and literal-free paths all yield `None`, never an error
//! - GET splits on whether the path ends in a placeholder: a trailing
//!   identifier means "fetch one", otherwise "search the collection"

use std::fmt;

use axum::http::Method;
use serde::Serialize;

use crate::config::schema::DispatchConfig;
use crate::dispatch::segment::{RouteShape, SegmentRules};

/// Controller action selected from the HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Get,
    Search,
    Create,
    Update,
    Modify,
    Delete,
}

impl Action {
    /// Map an HTTP method to an action. `None` for any verb outside the
    /// five handled ones; the dispatcher declines rather than guesses.
    pub fn resolve(method: &Method, is_search_like: bool) -> Option<Self> {
        match *method {
            Method::GET if is_search_like => Some(Action::Get),
            Method::GET => Some(Action::Search),
            Method::POST => Some(Action::Create),
            Method::PUT => Some(Action::Update),
            Method::PATCH => Some(Action::Modify),
            Method::DELETE => Some(Action::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Search => "search",
            Action::Create => "create",
            Action::Update => "update",
            Action::Modify => "modify",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespaced controller identifier derived from the literal path segments,
/// e.g. `/user/group/5` → `User::GroupController`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerName(String);

impl ControllerName {
    /// Build the name from literal segments: capitalize the first letter of
    /// each, join as namespace levels, suffix the last with `Controller`.
    ///
    /// Returns `None` when there are no literals (an all-placeholder path
    /// has no derivable controller).
    pub fn from_literals<'a>(literals: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut name = String::new();
        let mut any = false;
        for literal in literals {
            if any {
                name.push_str("::");
            }
            name.push_str(&ucfirst(literal));
            any = true;
        }
        if !any {
            return None;
        }
        name.push_str("Controller");
        Some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControllerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn ucfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A fully resolved dispatch decision for one request.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub controller: ControllerName,
    pub action: Action,
    pub shape: RouteShape,
}

/// The convention dispatcher. Holds only the compiled guard values and
/// classification rules; resolution itself is stateless per request.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    api_accept: String,
    base_path: String,
    rules: SegmentRules,
}

impl Dispatcher {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            api_accept: config.api_accept.clone(),
            base_path: config.base_path.clone(),
            rules: SegmentRules::new(config.param_marker.clone()),
        }
    }

    /// The activation guard: the request's Accept header must equal the
    /// configured value exactly. When it does not, the dispatcher does not
    /// participate at all.
    pub fn accepts(&self, accept: Option<&str>) -> bool {
        accept.is_some_and(|value| value == self.api_accept)
    }

    /// Resolve a request to a dispatch decision.
    ///
    /// `None` means the guard did not fire or the path has no convention
    /// shape; the caller falls through to whatever default routing exists.
    pub fn dispatch(
        &self,
        method: &Method,
        path_and_query: &str,
        accept: Option<&str>,
    ) -> Option<Dispatch> {
        if !self.accepts(accept) {
            return None;
        }
        self.resolve(method, path_and_query)
    }

    /// Resolution without the header guard, for callers that have already
    /// checked it.
    pub fn resolve(&self, method: &Method, path_and_query: &str) -> Option<Dispatch> {
        let rest = self.strip_base(path_and_query)?;
        let shape = RouteShape::parse(rest, &self.rules)?;
        let action = Action::resolve(method, shape.is_search_like())?;
        let controller = ControllerName::from_literals(shape.literals())?;
        Some(Dispatch {
            controller,
            action,
            shape,
        })
    }

    /// Strip the configured API base path. Requests outside it decline.
    fn strip_base<'a>(&self, path_and_query: &'a str) -> Option<&'a str> {
        if self.base_path.is_empty() {
            return Some(path_and_query);
        }
        let rest = path_and_query.strip_prefix(self.base_path.as_str())?;
        // "/apiary" must not match a "/api" base.
        if !rest.is_empty() && !rest.starts_with('/') && !rest.starts_with('?') {
            return None;
        }
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::from_config(&DispatchConfig::default())
    }

    fn resolve(method: Method, path: &str) -> Option<Dispatch> {
        dispatcher().resolve(&method, path)
    }

    #[test]
    fn post_collection_resolves_create() {
        let d = resolve(Method::POST, "/api/user/group").expect("dispatch");
        assert_eq!(d.controller.as_str(), "User::GroupController");
        assert_eq!(d.action, Action::Create);
        assert!(d.shape.params().is_empty());
    }

    #[test]
    fn get_with_trailing_id_resolves_get() {
        let d = resolve(Method::GET, "/api/user/group/5").expect("dispatch");
        assert_eq!(d.controller.as_str(), "User::GroupController");
        assert_eq!(d.action, Action::Get);
        assert_eq!(d.shape.params(), ["5"]);
    }

    #[test]
    fn get_collection_resolves_search() {
        let d = resolve(Method::GET, "/api/user/group").expect("dispatch");
        assert_eq!(d.action, Action::Search);
        assert!(d.shape.params().is_empty());
    }

    #[test]
    fn put_with_trailing_id_resolves_update() {
        let d = resolve(Method::PUT, "/api/user/user/7").expect("dispatch");
        assert_eq!(d.controller.as_str(), "User::UserController");
        assert_eq!(d.action, Action::Update);
    }

    #[test]
    fn patch_resolves_modify_and_delete_resolves_delete() {
        assert_eq!(
            resolve(Method::PATCH, "/api/user/user").map(|d| d.action),
            Some(Action::Modify)
        );
        assert_eq!(
            resolve(Method::DELETE, "/api/user/user/1").map(|d| d.action),
            Some(Action::Delete)
        );
    }

    #[test]
    fn unhandled_verbs_decline() {
        assert!(resolve(Method::HEAD, "/api/user/group").is_none());
        assert!(resolve(Method::OPTIONS, "/api/user/group").is_none());
    }

    #[test]
    fn paths_outside_base_decline() {
        assert!(resolve(Method::GET, "/user/group").is_none());
        assert!(resolve(Method::GET, "/apiary/group").is_none());
    }

    #[test]
    fn empty_path_under_base_declines() {
        assert!(resolve(Method::GET, "/api").is_none());
        assert!(resolve(Method::GET, "/api/").is_none());
    }

    #[test]
    fn all_placeholder_path_declines() {
        assert!(resolve(Method::GET, "/api/1/2").is_none());
    }

    #[test]
    fn header_guard_gates_dispatch() {
        let d = dispatcher();
        let accept = DispatchConfig::default().api_accept;
        assert!(d
            .dispatch(&Method::GET, "/api/user/group", Some(&accept))
            .is_some());
        assert!(d
            .dispatch(&Method::GET, "/api/user/group", Some("application/json"))
            .is_none());
        assert!(d.dispatch(&Method::GET, "/api/user/group", None).is_none());
    }

    #[test]
    fn query_string_does_not_change_resolution() {
        let plain = resolve(Method::DELETE, "/api/user/user").expect("dispatch");
        let with_query = resolve(Method::DELETE, "/api/user/user?id=1").expect("dispatch");
        assert_eq!(plain.controller, with_query.controller);
        assert_eq!(plain.action, with_query.action);
        assert_eq!(plain.shape.template(), with_query.shape.template());
    }

    #[test]
    fn controller_name_capitalizes_each_level() {
        let name = ControllerName::from_literals(["system", "audit", "trace"]).expect("name");
        assert_eq!(name.as_str(), "System::Audit::TraceController");
    }
}
