use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use services::Actor;
use util::state::AppState;

use crate::extract::{JsonBody, PathParams};
use crate::response::{ApiResponse, bad_request, service_error};
use crate::routes::common::update_request_service;

/// POST /api/offers/{offer_id}/update-request
///
/// Submits proposed edits to one of the trader's ACTIVE offers for staff
/// review. Only one request per offer may be PENDING at a time.
///
/// ### Request Body
/// Any subset of `title`, `description`, `images`, `country`, `city`,
/// `categoryId`, `acceptsNegotiation`. Other keys are ignored.
/// ```json
/// { "title": "Premium dates, 10kg", "acceptsNegotiation": true }
/// ```
///
/// ### Responses
/// - `201 Created` → the PENDING request
/// - `400 Bad Request` → offer not ACTIVE, a request already pending, or no recognised changes
/// - `403 Forbidden` → not the caller's offer
/// - `404 Not Found` → offer missing
pub async fn create_update_request(
    State(app_state): State<AppState>,
    PathParams(offer_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    JsonBody(body): JsonBody<Value>,
) -> Response {
    let Actor::Trader { id: trader_id } = actor else {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("Only traders can request offer updates")),
        )
            .into_response();
    };

    let Some(changes) = body.as_object() else {
        return bad_request("Request body must be a JSON object");
    };

    match update_request_service(&app_state)
        .create(trader_id, offer_id, changes)
        .await
    {
        Ok(request) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                request,
                "Update request submitted successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to submit update request"),
    }
}
