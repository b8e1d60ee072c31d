//! Search routes under `/search`.
//!
//! Catalogue searches are public but remember who searched when a valid
//! token is present. Order search needs a staff token; history and saved
//! searches belong to the authenticated caller.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_staff};
use crate::auth::middleware::capture_search_context;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use delete::delete_saved_search;
use get::{
    list_saved_searches, popular_searches, search_categories, search_global, search_history,
    search_orders, search_products, search_vendors,
};
use post::save_search;

/// Routes:
/// - `GET    /products`           → Product search (public)
/// - `GET    /categories`         → Category search (public)
/// - `GET    /vendors`            → Vendor search (public)
/// - `GET    /global`             → Top matches across the catalogue (public)
/// - `GET    /popular`            → Most frequent queries (public)
/// - `GET    /orders`             → Order search (staff)
/// - `GET    /history`            → Caller's recent searches
/// - `GET    /saved`              → Caller's saved searches
/// - `POST   /saved`              → Save a search
/// - `DELETE /saved/{saved_id}`   → Delete a saved search
pub fn search_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/products", get(search_products))
        .route("/categories", get(search_categories))
        .route("/vendors", get(search_vendors))
        .route("/global", get(search_global))
        .route("/popular", get(popular_searches))
        .route_layer(from_fn(capture_search_context));

    let staff = Router::new()
        .route("/orders", get(search_orders))
        .route_layer(from_fn(allow_staff));

    let personal = Router::new()
        .route("/history", get(search_history))
        .route("/saved", get(list_saved_searches).post(save_search))
        .route("/saved/{saved_id}", delete(delete_saved_search))
        .route_layer(from_fn(allow_authenticated));

    public.merge(staff).merge(personal)
}
