use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use util::{config, state::AppState};

use crate::response::ApiResponse;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    service: String,
    version: &'static str,
}

/// Builds the `/health` route group.
///
/// This includes a single `GET /health` endpoint that returns a basic success message.
/// Useful for uptime checks, load balancers, or deployment health monitoring.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Returns a simple success response to indicate the API is running.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": { "status": "ok", "service": "trade-desk", "version": "0.1.0" },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check() -> impl IntoResponse {
    let status = HealthStatus {
        status: "ok",
        service: config::project_name(),
        version: env!("CARGO_PKG_VERSION"),
    };
    Json(ApiResponse::success(status, "Health check passed"))
}
