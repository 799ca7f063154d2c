use axum::{Json, Router, response::IntoResponse, routing::get};
use util::state::AppState;

use crate::response::{ApiResponse, Empty};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /api/health
///
/// Liveness probe; requires no authentication.
async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(Empty, "API is up"))
}
