//! Ticket read handlers: listings, detail and per-status counts.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::offer_support_ticket::{TicketPriority, TicketStatus};
use services::Actor;
use services::ticket_service::TicketListQuery;
use util::state::AppState;

use crate::extract::{PathParams, QueryParams};
use crate::response::{ApiResponse, PaginatedResponse, service_error};
use crate::routes::common::{page_request, parse_optional, ticket_service};
use crate::routes::tickets::common::TicketListParams;

/// GET /api/traders/support-tickets
/// GET /api/employees/support-tickets
/// GET /api/admin/offer-support-tickets
///
/// Lists the tickets visible to the caller, most recently updated first. Each
/// row carries its newest message as `latestMessage`.
///
/// ### Query Parameters
/// - `offerId`, `status`, `priority` → narrow any listing
/// - `employeeId`, `traderId` → admin listings only
/// - `search` → case-insensitive match on the subject (staff listings)
/// - `page` (default 1), `limit` (default 20, max 100)
///
/// ### Responses
/// - `200 OK` with a `pagination` block
/// - `400 Bad Request` → unknown `status` or `priority`
pub async fn list_tickets(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    QueryParams(params): QueryParams<TicketListParams>,
) -> Response {
    let status = match parse_optional::<TicketStatus>(params.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    let priority = match parse_optional::<TicketPriority>(params.priority.as_deref(), "priority") {
        Ok(priority) => priority,
        Err(response) => return response,
    };

    let query = TicketListQuery {
        offer_id: params.offer_id,
        status,
        priority,
        employee_id: params.employee_id,
        trader_id: params.trader_id,
        search: params.search,
    };
    let page = page_request(params.page, params.limit);

    match ticket_service(&app_state).list(&actor, query, page).await {
        Ok((tickets, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(
                tickets,
                page,
                total,
                "Support tickets retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve support tickets"),
    }
}

/// GET /api/{traders|employees}/support-tickets/{ticket_id}
/// GET /api/admin/offer-support-tickets/{ticket_id}
///
/// Returns the ticket with its offer, trader, assigned employee and the full
/// message thread, oldest message first.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` → the ticket's trader is outside the caller's reach
/// - `404 Not Found` → ticket or offer missing
pub async fn get_ticket(
    State(app_state): State<AppState>,
    PathParams(ticket_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
) -> Response {
    match ticket_service(&app_state).detail(&actor, ticket_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(ApiResponse::success(detail, "Support ticket retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve support ticket"),
    }
}

/// GET /api/{employees/support-tickets|admin/offer-support-tickets}/stats
///
/// Ticket counts per status within the caller's visibility.
pub async fn ticket_stats(State(app_state): State<AppState>, Extension(actor): Extension<Actor>) -> Response {
    match ticket_service(&app_state).stats(&actor).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Ticket statistics retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve ticket statistics"),
    }
}
