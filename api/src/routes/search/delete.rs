use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::Actor;
use util::state::AppState;

use crate::extract::PathParams;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::search_service;

/// DELETE /api/search/saved/{saved_id}
///
/// Someone else's saved search answers `404`, same as a missing one.
pub async fn delete_saved_search(
    State(app_state): State<AppState>,
    PathParams(saved_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
) -> Response {
    match search_service(&app_state).delete_saved_search(&actor, saved_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Saved search deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to delete saved search"),
    }
}
