//! HTTP route entry point for `/api/...`.
//!
//! Route groups are organized by caller:
//! - `/health` → Health check endpoint (public)
//! - `/offers`, `/traders` → Trader endpoints
//! - `/employees` → Employee endpoints
//! - `/admin` → Review endpoints for employees and admins
//! - `/search` → Catalogue search, history and saved searches
//! - `/translations` → File-backed translations

use crate::auth::guards::{allow_employee, allow_staff, allow_trader};
use crate::routes::{
    health::health_routes,
    offers::{employee_offer_routes, offer_routes},
    search::search_routes,
    tickets::{staff_ticket_routes, trader_ticket_routes},
    translations::translation_routes,
    update_requests::{review_update_request_routes, trader_update_request_routes},
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod common;
pub mod health;
pub mod offers;
pub mod search;
pub mod tickets;
pub mod translations;
pub mod update_requests;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/offers` → Ticket and update-request creation (traders).
/// - `/traders/support-tickets` → A trader's own tickets.
/// - `/traders/offers/update-requests` → A trader's own update requests.
/// - `/employees/offers` → Ticket creation on managed traders' offers.
/// - `/employees/support-tickets` → Tickets of managed traders.
/// - `/admin/offer-support-tickets` → Ticket administration (employees and admins).
/// - `/admin/offer-update-requests` → Update-request review (employees and admins).
/// - `/search` → Search endpoints (guards per route).
/// - `/translations` → Translation store (writes admin-only).
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/offers", offer_routes().route_layer(from_fn(allow_trader)))
        .nest(
            "/traders/support-tickets",
            trader_ticket_routes().route_layer(from_fn(allow_trader)),
        )
        .nest(
            "/traders/offers/update-requests",
            trader_update_request_routes().route_layer(from_fn(allow_trader)),
        )
        .nest(
            "/employees/offers",
            employee_offer_routes().route_layer(from_fn(allow_employee)),
        )
        .nest(
            "/employees/support-tickets",
            staff_ticket_routes().route_layer(from_fn(allow_employee)),
        )
        .nest(
            "/admin/offer-support-tickets",
            staff_ticket_routes().route_layer(from_fn(allow_staff)),
        )
        .nest(
            "/admin/offer-update-requests",
            review_update_request_routes().route_layer(from_fn(allow_staff)),
        )
        .nest("/search", search_routes())
        .nest("/translations", translation_routes())
        .with_state(app_state)
}
