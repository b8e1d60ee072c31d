//! Review and cancellation of update requests.

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::Actor;
use util::state::AppState;

use crate::extract::PathParams;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::{optional_json, update_request_service};
use crate::routes::update_requests::common::ReviewRequest;

/// PUT /api/admin/offer-update-requests/{request_id}/approve
///
/// Applies the requested changes to the offer and marks the request
/// APPROVED. Both writes happen together or not at all.
///
/// ### Request Body (optional)
/// ```json
/// { "reviewNotes": "Looks good" }
/// ```
///
/// ### Responses
/// - `200 OK` → `{ request, offer }`
/// - `400 Bad Request` → request no longer PENDING
/// - `403 Forbidden` / `404 Not Found`
pub async fn approve_update_request(
    State(app_state): State<AppState>,
    PathParams(request_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    body: Bytes,
) -> Response {
    let req = match optional_json::<ReviewRequest>(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match update_request_service(&app_state)
        .approve(&actor, request_id, req.review_notes)
        .await
    {
        Ok(approved) => (
            StatusCode::OK,
            Json(ApiResponse::success(approved, "Update request approved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to approve update request"),
    }
}

/// PUT /api/admin/offer-update-requests/{request_id}/reject
///
/// Marks the request REJECTED. `reviewNotes` is required and stored verbatim;
/// the offer is left untouched.
pub async fn reject_update_request(
    State(app_state): State<AppState>,
    PathParams(request_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    body: Bytes,
) -> Response {
    let req = match optional_json::<ReviewRequest>(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match update_request_service(&app_state)
        .reject(&actor, request_id, req.review_notes)
        .await
    {
        Ok(request) => (
            StatusCode::OK,
            Json(ApiResponse::success(request, "Update request rejected successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to reject update request"),
    }
}

/// PUT /api/traders/offers/update-requests/{request_id}/cancel
pub async fn cancel_update_request(
    State(app_state): State<AppState>,
    PathParams(request_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
) -> Response {
    let Actor::Trader { id: trader_id } = actor else {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("Only traders can cancel update requests")),
        )
            .into_response();
    };

    match update_request_service(&app_state).cancel(trader_id, request_id).await {
        Ok(request) => (
            StatusCode::OK,
            Json(ApiResponse::success(request, "Update request cancelled successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to cancel update request"),
    }
}
