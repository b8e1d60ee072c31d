//! Ticket creation and message handlers.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::offer_support_ticket::TicketPriority;
use services::Actor;
use services::ticket_service::{CreateTicket, PostMessage};
use util::state::AppState;
use validator::Validate;

use crate::extract::{JsonBody, PathParams};
use crate::response::{ApiResponse, format_validation_errors, service_error};
use crate::routes::common::{parse_optional, ticket_service};
use crate::routes::tickets::common::{CreateTicketRequest, MessageRequest};

/// POST /api/offers/{offer_id}/support-tickets
/// POST /api/employees/offers/{offer_id}/support-tickets
///
/// Opens a support ticket about an offer and seeds it with the caller's first
/// message. Traders may only open tickets on their own offers; employees may
/// open tickets on offers of traders assigned to them and become the
/// ticket's employee.
///
/// ### Request Body
/// ```json
/// {
///   "subject": "Shipping terms",
///   "message": "Can the offer ship to Jeddah?",
///   "priority": "HIGH"
/// }
/// ```
/// `priority` is optional (`LOW`, `MEDIUM`, `HIGH`, `URGENT`) and defaults to `MEDIUM`.
///
/// ### Responses
/// - `201 Created` → `{ ticket, message }`
/// - `400 Bad Request` → missing subject/message or unknown priority
/// - `403 Forbidden` → the offer is outside the caller's reach
/// - `404 Not Found` → the offer does not exist
/// - `500 Internal Server Error`
pub async fn create_ticket(
    State(app_state): State<AppState>,
    PathParams(offer_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    JsonBody(req): JsonBody<CreateTicketRequest>,
) -> Response {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(error_message)),
        )
            .into_response();
    }

    let priority = match parse_optional::<TicketPriority>(req.priority.as_deref(), "priority") {
        Ok(priority) => priority,
        Err(response) => return response,
    };

    let input = CreateTicket {
        offer_id,
        subject: req.subject,
        message: req.message,
        priority,
    };

    let service = ticket_service(&app_state);
    let result = match actor {
        Actor::Trader { id } => service.create_by_trader(id, input).await,
        Actor::Employee { id } => service.create_by_employee(id, input).await,
        Actor::Admin { .. } => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<()>::error(
                    "Only traders and employees can open support tickets",
                )),
            )
                .into_response();
        }
    };

    match result {
        Ok(opened) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(opened, "Support ticket created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to create support ticket"),
    }
}

/// POST /api/{traders|employees|admin}/.../{ticket_id}/messages
///
/// Appends a message to the thread. Posting to a RESOLVED ticket reopens it;
/// an employee posting to an unassigned ticket claims it.
///
/// ### Request Body
/// ```json
/// { "message": "Any update?", "attachments": ["https://files/invoice.pdf"] }
/// ```
///
/// ### Responses
/// - `201 Created` → the stored message
/// - `400 Bad Request` → empty message, or the ticket is CLOSED
/// - `403 Forbidden` / `404 Not Found`
pub async fn add_message(
    State(app_state): State<AppState>,
    PathParams(ticket_id): PathParams<i64>,
    Extension(actor): Extension<Actor>,
    JsonBody(req): JsonBody<MessageRequest>,
) -> Response {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&validation_errors))),
        )
            .into_response();
    }

    let input = PostMessage {
        message: req.message,
        attachments: req.attachments,
    };

    match ticket_service(&app_state).add_message(&actor, ticket_id, input).await {
        Ok(message) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(message, "Message sent successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to send message"),
    }
}
