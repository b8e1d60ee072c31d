//! Helpers shared by the route handlers: service construction from
//! [`AppState`], pagination query parameters and enum parsing.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::response::Response;
use serde::de::DeserializeOwned;
use services::search_service::SearchService;
use services::store::SeaOrmStore;
use services::ticket_service::TicketService;
use services::translation_service::{TranslationService, TranslationStore};
use services::update_request_service::UpdateRequestService;
use util::{config, paging::PageRequest, state::AppState};

use crate::response::bad_request;

pub fn ticket_service(app_state: &AppState) -> TicketService {
    TicketService::from_store(Arc::new(SeaOrmStore::new(app_state.db_clone())))
}

pub fn update_request_service(app_state: &AppState) -> UpdateRequestService {
    UpdateRequestService::from_store(Arc::new(SeaOrmStore::new(app_state.db_clone())))
}

pub fn search_service(app_state: &AppState) -> SearchService {
    SearchService::new(app_state.db_clone())
}

pub fn translation_service(app_state: &AppState) -> TranslationService {
    TranslationService::new(
        TranslationStore::new(app_state.translations_root().clone()),
        app_state.db_clone(),
    )
}

/// Resolves the `page` and `limit` query parameters against the configured
/// defaults.
pub fn page_request(page: Option<u64>, limit: Option<u64>) -> PageRequest {
    PageRequest::resolve(page, limit, config::default_page_size(), config::max_page_size())
}

/// Parses an optional enum-valued parameter, answering `400 Invalid {label}`
/// for values outside the enum. Blank values count as absent.
pub fn parse_optional<T: FromStr>(raw: Option<&str>, label: &str) -> Result<Option<T>, Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| bad_request(format!("Invalid {label}: {value}"))),
    }
}

/// Decodes a JSON body that may be omitted entirely. An empty body yields
/// `T::default()`; malformed JSON is a `400`.
pub fn optional_json<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| bad_request("Invalid request body"))
}
