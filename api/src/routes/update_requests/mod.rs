//! Offer update-request routes.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::{get_update_request, list_update_requests};
use put::{approve_update_request, cancel_update_request, reject_update_request};

pub use post::create_update_request;

/// Mounted at `/traders/offers/update-requests`.
///
/// Routes:
/// - `GET /`                      → Own requests
/// - `GET /{request_id}`          → Request detail
/// - `PUT /{request_id}/cancel`   → Withdraw a PENDING request
pub fn trader_update_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_update_requests))
        .route("/{request_id}", get(get_update_request))
        .route("/{request_id}/cancel", put(cancel_update_request))
}

/// Mounted at `/admin/offer-update-requests`.
///
/// Routes:
/// - `GET /`                      → Requests within the reviewer's reach
/// - `GET /{request_id}`          → Request detail with current offer
/// - `PUT /{request_id}/approve`  → Apply and approve
/// - `PUT /{request_id}/reject`   → Reject with notes
pub fn review_update_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_update_requests))
        .route("/{request_id}", get(get_update_request))
        .route("/{request_id}/approve", put(approve_update_request))
        .route("/{request_id}/reject", put(reject_update_request))
}
