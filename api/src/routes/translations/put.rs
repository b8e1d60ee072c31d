use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use util::state::AppState;

use crate::extract::{JsonBody, PathParams};
use crate::response::{ApiResponse, bad_request, service_error};
use crate::routes::common::translation_service;
use crate::routes::translations::common::SetTranslationRequest;

/// PUT /api/translations/{language}/{namespace}/{key}
///
/// Admin only. Creates the language, namespace and parent objects as needed;
/// the last write wins.
///
/// ### Request Body
/// ```json
/// { "value": "Save", "description": "Primary button label" }
/// ```
pub async fn set_translation(
    State(app_state): State<AppState>,
    PathParams((language, namespace, key)): PathParams<(String, String, String)>,
    JsonBody(req): JsonBody<SetTranslationRequest>,
) -> Response {
    if req.value == Value::Null {
        return bad_request("Value is required");
    }

    match translation_service(&app_state)
        .set(&language, &namespace, &key, req.value, req.description)
        .await
    {
        Ok(meta) => (
            StatusCode::OK,
            Json(ApiResponse::success(meta, "Translation saved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to save translation"),
    }
}
