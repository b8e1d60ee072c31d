use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use util::state::AppState;

use crate::extract::{JsonBody, PathParams};
use crate::response::{ApiResponse, service_error};
use crate::routes::common::translation_service;
use crate::routes::translations::common::ImportRequest;

/// POST /api/translations/{language}/{namespace}/import
///
/// Admin only. Deep-merges `data` into the namespace. Existing values are
/// kept unless `overwrite` is true.
///
/// ### Request Body
/// ```json
/// { "data": { "buttons": { "save": "Save", "cancel": "Cancel" } }, "overwrite": false }
/// ```
///
/// ### Responses
/// - `200 OK` → `{ "imported": 2 }`
/// - `400 Bad Request` → `data` is not an object, or an invalid language/namespace
pub async fn import_translations(
    State(app_state): State<AppState>,
    PathParams((language, namespace)): PathParams<(String, String)>,
    JsonBody(req): JsonBody<ImportRequest>,
) -> Response {
    match translation_service(&app_state)
        .import(&language, &namespace, req.data, req.overwrite)
        .await
    {
        Ok(imported) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                json!({ "imported": imported }),
                "Translations imported successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to import translations"),
    }
}
