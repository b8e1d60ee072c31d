//! Ticket status and assignment handlers.

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::offer_support_ticket::TicketStatus;
use services::Actor;
use util::state::AppState;

use crate::extract::{JsonBody, PathParams};
use crate::response::{ApiResponse, bad_request, service_error};
use crate::routes::common::{optional_json, parse_optional, ticket_service};
use crate::routes::tickets::common::{AssignRequest, StatusRequest};

/// PUT /api/admin/offer-support-tickets/{ticket_id}/status
/// PUT /api/employees/support-tickets/{ticket_id}/status
///
/// Moves a ticket to `OPEN`, `IN_PROGRESS`, `RESOLVED` or `CLOSED`.
/// `resolvedAt` and `closedAt` are stamped the first time the ticket reaches
/// those states. A CLOSED ticket cannot change status again.
///
/// ### Request Body
/// ```json
/// { "status": "RESOLVED" }
/// ```
///
/// ### Responses
/// - `200 OK` → the updated ticket
/// - `400 Bad Request` → missing or unknown status, or the ticket is CLOSED
/// - `403 Forbidden` / `404 Not Found`
pub async fn update_status(
    State(app_state): State<AppState>,
    PathParams(ticket_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> Response {
    let status = match parse_optional::<TicketStatus>(req.status.as_deref(), "status") {
        Ok(Some(status)) => status,
        Ok(None) => return bad_request("Status is required"),
        Err(response) => return response,
    };

    match ticket_service(&app_state).update_status(&actor, ticket_id, status).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(ticket, "Ticket status updated successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to update ticket status"),
    }
}

/// PUT /api/admin/offer-support-tickets/{ticket_id}/assign
/// PUT /api/employees/support-tickets/{ticket_id}/assign
///
/// Assigns the ticket to an employee. Employees may only assign to
/// themselves and may omit `employeeId` (or the whole body); admins must
/// name the employee. An OPEN ticket moves to IN_PROGRESS on assignment.
///
/// ### Request Body
/// ```json
/// { "employeeId": 4 }
/// ```
///
/// ### Responses
/// - `200 OK` → the updated ticket
/// - `400 Bad Request` → ticket CLOSED, or admin without `employeeId`
/// - `403 Forbidden` → employee naming someone else
/// - `404 Not Found` → ticket or employee missing
pub async fn assign_ticket(
    State(app_state): State<AppState>,
    PathParams(ticket_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    body: Bytes,
) -> Response {
    let req = match optional_json::<AssignRequest>(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match ticket_service(&app_state)
        .assign(&actor, ticket_id, req.employee_id)
        .await
    {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(ticket, "Ticket assigned successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to assign ticket"),
    }
}
