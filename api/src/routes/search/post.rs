use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::Actor;
use services::search_service::NewSavedSearch;
use util::state::AppState;

use crate::extract::JsonBody;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::search_service;
use crate::routes::search::common::SaveSearchRequest;

/// POST /api/search/saved
///
/// ### Request Body
/// ```json
/// { "name": "Cheap dates", "query": "dates", "filters": { "maxPrice": 20 } }
/// ```
///
/// ### Responses
/// - `201 Created` → the saved search
/// - `400 Bad Request` → blank `name` or `query`
pub async fn save_search(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    JsonBody(req): JsonBody<SaveSearchRequest>,
) -> Response {
    let input = NewSavedSearch {
        name: req.name,
        query: req.query,
        filters: req.filters,
    };

    match search_service(&app_state).save_search(&actor, input).await {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(saved, "Search saved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to save search"),
    }
}
