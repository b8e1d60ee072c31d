use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::state::AppState;

use crate::extract::PathParams;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::translation_service;

/// DELETE /api/translations/{language}/{namespace}/{key}
///
/// Admin only. Parent objects left empty by the removal are pruned.
pub async fn delete_translation(
    State(app_state): State<AppState>,
    PathParams((language, namespace, key)): PathParams<(String, String, String)>,
) -> Response {
    match translation_service(&app_state)
        .delete(&language, &namespace, &key)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Translation deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to delete translation"),
    }
}
