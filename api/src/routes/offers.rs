//! Trader actions on a single offer, mounted at `/offers` and
//! `/employees/offers`.

use axum::{Router, routing::post};
use util::state::AppState;

use crate::routes::tickets::create_ticket;
use crate::routes::update_requests::create_update_request;

/// Routes:
/// - `POST /{offer_id}/support-tickets` → Open a ticket
/// - `POST /{offer_id}/update-request`  → Propose edits for review
pub fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/{offer_id}/support-tickets", post(create_ticket))
        .route("/{offer_id}/update-request", post(create_update_request))
}

/// Routes:
/// - `POST /{offer_id}/support-tickets` → Open a ticket on a managed trader's offer
pub fn employee_offer_routes() -> Router<AppState> {
    Router::new().route("/{offer_id}/support-tickets", post(create_ticket))
}
