pub mod handlers;

use axum::routing::get;
use axum::Router;

use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .route("/admin/traces", get(get_traces))
        .with_state(state)
}
