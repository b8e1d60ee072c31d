//! Support ticket routes.
//!
//! The same handlers serve the trader, employee and admin route groups; the
//! caller's [`services::Actor`] decides what each handler may see or change.

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::{get_ticket, list_tickets, ticket_stats};
use post::add_message;
use put::{assign_ticket, update_status};

pub use post::create_ticket;

/// Trader view, mounted at `/traders/support-tickets`.
///
/// Routes:
/// - `GET  /`                        → Own tickets
/// - `GET  /{ticket_id}`             → Ticket detail with thread
/// - `POST /{ticket_id}/messages`    → Reply on a ticket
pub fn trader_ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/messages", post(add_message))
}

/// Staff view, mounted at `/employees/support-tickets` and
/// `/admin/offer-support-tickets`.
///
/// Routes:
/// - `GET  /`                        → Visible tickets
/// - `GET  /stats`                   → Counts per status
/// - `GET  /{ticket_id}`             → Ticket detail with thread
/// - `POST /{ticket_id}/messages`    → Reply on a ticket
/// - `PUT  /{ticket_id}/status`      → Change status
/// - `PUT  /{ticket_id}/assign`      → Assign to an employee
pub fn staff_ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/stats", get(ticket_stats))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/messages", post(add_message))
        .route("/{ticket_id}/status", put(update_status))
        .route("/{ticket_id}/assign", put(assign_ticket))
}
