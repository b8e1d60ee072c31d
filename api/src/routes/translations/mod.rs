//! Translation routes under `/translations`.
//!
//! Reads are public. Writes need an admin token.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_translation;
use get::{
    export_language, get_namespace, get_translation, list_languages, list_namespaces,
    missing_translations, translation_status,
};
use post::import_translations;
use put::set_translation;

/// Routes:
/// - `GET    /`                                  → Languages
/// - `GET    /status`                            → Completion per language
/// - `GET    /{language}`                        → Namespaces of a language
/// - `GET    /{language}/export`                 → Every namespace of a language
/// - `GET    /{language}/missing`                → Keys missing against the reference language
/// - `GET    /{language}/{namespace}`            → Namespace document
/// - `GET    /{language}/{namespace}/{key}`      → One value
/// - `PUT    /{language}/{namespace}/{key}`      → Set a value (admin)
/// - `DELETE /{language}/{namespace}/{key}`      → Remove a value (admin)
/// - `POST   /{language}/{namespace}/import`     → Deep-merge a document (admin)
pub fn translation_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_languages))
        .route("/status", get(translation_status))
        .route("/{language}", get(list_namespaces))
        .route("/{language}/export", get(export_language))
        .route("/{language}/missing", get(missing_translations))
        .route("/{language}/{namespace}", get(get_namespace))
        .route("/{language}/{namespace}/{key}", get(get_translation));

    let admin = Router::new()
        .route(
            "/{language}/{namespace}/{key}",
            put(set_translation).delete(delete_translation),
        )
        .route("/{language}/{namespace}/import", post(import_translations))
        .route_layer(from_fn(allow_admin));

    public.merge(admin)
}
