//! HTTP server setup and the convention-dispatch handler.
//!
//! # Responsibilities
//! - Create the axum Router with the dispatch fallback and admin surface
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Hold application state (config snapshot, route table, registry)
//! - Apply configuration updates without restarting
//!
//! # Design Decisions
//! - Convention dispatch runs as the router *fallback*: explicitly mounted
//!   routes (admin) always win, and a declined dispatch falls back to the
//!   host 404 rather than an error
//! - The config snapshot is arc-swapped; each request reads a coherent view
//! - Route registration goes through the injectable `RouteSink`, never a
//!   global table

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::audit::TraceLog;
use crate::config::schema::AppConfig;
use crate::controllers::{GroupController, JobController, UserController};
use crate::dispatch::{
    ActionContext, Dispatcher, HandlerRegistry, RegisteredRoute, RouteSink, RouteTable,
};
use crate::groups::{GroupService, MemoryGroupStore};
use crate::http::request::{request_id_header, MakeRequestUuid};
use crate::http::response::ApiError;
use crate::jobs::{JobService, MemoryJobStore};
use crate::observability::metrics;
use crate::users::{MemoryUserStore, UserService};

/// Header carrying the acting user's id (a session stand-in, not auth).
pub const X_ACTOR_ID: &str = "x-actor-id";

/// The arc-swapped per-config part of the state.
pub struct AppInner {
    pub config: AppConfig,
    pub dispatcher: Dispatcher,
}

impl AppInner {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = Dispatcher::from_config(&config.dispatch);
        Self { config, dispatcher }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<AppInner>>,
    pub routes: Arc<RouteTable>,
    pub registry: Arc<HandlerRegistry>,
    pub traces: Arc<TraceLog>,
}

/// HTTP server for the admin API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds the services and populates the handler registry; the derived
    /// controller names here are exactly what the dispatcher computes at
    /// request time.
    pub fn new(config: AppConfig) -> Self {
        let traces = Arc::new(TraceLog::new(config.audit.recent_capacity));

        let group_service = Arc::new(GroupService::new(
            Arc::new(MemoryGroupStore::new()),
            traces.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::new(MemoryUserStore::new()),
            traces.clone(),
        ));
        let job_service = Arc::new(JobService::new(
            Arc::new(MemoryJobStore::new()),
            traces.clone(),
        ));

        let registry = Arc::new(HandlerRegistry::new());
        let paging = config.pagination.clone();
        registry.register(
            &["user", "group"],
            Arc::new(GroupController::new(group_service, paging.clone())),
        );
        registry.register(
            &["user", "user"],
            Arc::new(UserController::new(user_service, paging.clone())),
        );
        registry.register(
            &["job", "job"],
            Arc::new(JobController::new(job_service, paging)),
        );

        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(AppInner::new(config.clone()))),
            routes: Arc::new(RouteTable::new()),
            registry,
            traces,
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .fallback(dispatch_handler)
            .with_state(state.clone());
        if config.admin.enabled {
            router = router.merge(crate::admin::setup_admin_router(state));
        }
        // Applied innermost-first; each `Router::layer` call wraps the ones
        // before it, so the request-id layers end up outermost.
        router
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates arriving on `config_updates` are swapped in
    /// for subsequent requests; guard and classification changes apply
    /// without a restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let inner = self.state.inner.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                tracing::info!("Applying updated configuration");
                inner.store(Arc::new(AppInner::new(new_config)));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await
    }
}

/// The convention-dispatch fallback handler.
///
/// Anything the dispatcher declines (guard mismatch, empty path, unknown
/// verb, unregistered controller) becomes a plain 404 from the host router.
async fn dispatch_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let inner = state.inner.load_full();
    let (parts, body) = req.into_parts();

    let accept = parts
        .headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());

    let Some(dispatch) = inner
        .dispatcher
        .dispatch(&parts.method, path_and_query, accept)
    else {
        metrics::record_declined();
        return StatusCode::NOT_FOUND.into_response();
    };

    // One registration per qualifying request shape; races between
    // equivalent shapes coalesce inside the table.
    let route = RegisteredRoute::from_dispatch(&parts.method, &dispatch);
    tracing::debug!(
        method = %route.method,
        template = %route.template,
        controller = %route.controller,
        action = %route.action,
        "Route registered"
    );
    state.routes.register(route);
    metrics::record_dispatch(dispatch.controller.as_str(), dispatch.action);

    let Some(controller) = state.registry.get(&dispatch.controller) else {
        tracing::debug!(controller = %dispatch.controller, "No handler registered");
        metrics::record_unhandled(dispatch.controller.as_str());
        return StatusCode::NOT_FOUND.into_response();
    };

    let actor = parts
        .headers
        .get(X_ACTOR_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let query: HashMap<String, String> = parts
        .uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let max_body = inner.config.listener.max_body_bytes;
    let bytes = match to_bytes(body, max_body).await {
        Ok(bytes) => bytes,
        Err(_) => return ApiError::BadBody.into_response(),
    };
    let body = if bytes.is_empty() {
        None
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(_) => return ApiError::BadBody.into_response(),
        }
    };

    let ctx = ActionContext {
        params: dispatch.shape.params().to_vec(),
        query,
        body,
        actor,
    };
    match controller.handle(dispatch.action, ctx) {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
