use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::audit::TraceEntry;
use crate::dispatch::RegisteredRoute;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub registered_controllers: usize,
    pub registered_routes: usize,
    pub traces_recorded: u64,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        registered_controllers: state.registry.len(),
        registered_routes: state.routes.len(),
        traces_recorded: state.traces.recorded(),
    })
}

/// The dynamically registered route table. This is the inspection window
/// into the implicit convention routing: routes appear here as request
/// shapes arrive.
pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RegisteredRoute>> {
    Json(state.routes.snapshot())
}

pub async fn get_traces(State(state): State<AppState>) -> Json<Vec<TraceEntry>> {
    Json(state.traces.recent(100))
}
