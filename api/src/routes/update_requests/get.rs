use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::offer_update_request::UpdateRequestStatus;
use services::Actor;
use services::update_request_service::UpdateRequestListQuery;
use util::state::AppState;

use crate::extract::{PathParams, QueryParams};
use crate::response::{ApiResponse, PaginatedResponse, service_error};
use crate::routes::common::{page_request, parse_optional, update_request_service};
use crate::routes::update_requests::common::UpdateRequestListParams;

/// GET /api/traders/offers/update-requests
/// GET /api/admin/offer-update-requests
///
/// Newest first. Traders see requests on their own offers, employees those of
/// their assigned traders, admins everything. Filters: `offerId`, `status`,
/// `page`, `limit`.
pub async fn list_update_requests(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    QueryParams(params): QueryParams<UpdateRequestListParams>,
) -> Response {
    let status = match parse_optional::<UpdateRequestStatus>(params.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let page = page_request(params.page, params.limit);
    let query = UpdateRequestListQuery {
        offer_id: params.offer_id,
        status,
    };

    match update_request_service(&app_state).list(&actor, query, page).await {
        Ok((requests, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(
                requests,
                page,
                total,
                "Update requests retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve update requests"),
    }
}

/// GET /api/admin/offer-update-requests/{request_id}
///
/// The request next to the offer's current values, so a reviewer can compare.
pub async fn get_update_request(
    State(app_state): State<AppState>,
    PathParams(request_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
) -> Response {
    match update_request_service(&app_state).detail(&actor, request_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(ApiResponse::success(detail, "Update request retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve update request"),
    }
}
