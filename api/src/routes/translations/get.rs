//! Public translation reads.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::{config, state::AppState};

use crate::extract::{PathParams, QueryParams};
use crate::response::{ApiResponse, service_error};
use crate::routes::common::translation_service;
use crate::routes::translations::common::MissingParams;

/// GET /api/translations
///
/// Language codes that have a directory under the translation root.
pub async fn list_languages(State(app_state): State<AppState>) -> Response {
    let service = translation_service(&app_state);
    match service.store().languages().await {
        Ok(languages) => (
            StatusCode::OK,
            Json(ApiResponse::success(languages, "Languages retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to list languages"),
    }
}

/// GET /api/translations/{language}
pub async fn list_namespaces(State(app_state): State<AppState>, PathParams(language): PathParams<String>) -> Response {
    let service = translation_service(&app_state);
    match service.store().namespaces(&language).await {
        Ok(namespaces) => (
            StatusCode::OK,
            Json(ApiResponse::success(namespaces, "Namespaces retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to list namespaces"),
    }
}

/// GET /api/translations/{language}/{namespace}
///
/// The whole namespace document as stored, nested objects included.
pub async fn get_namespace(
    State(app_state): State<AppState>,
    PathParams((language, namespace)): PathParams<(String, String)>,
) -> Response {
    let service = translation_service(&app_state);
    match service.store().namespace(&language, &namespace).await {
        Ok(document) => (
            StatusCode::OK,
            Json(ApiResponse::success(document, "Translations retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to read translations"),
    }
}

/// GET /api/translations/{language}/{namespace}/{key}
///
/// `key` is dot-separated, e.g. `buttons.save`.
pub async fn get_translation(
    State(app_state): State<AppState>,
    PathParams((language, namespace, key)): PathParams<(String, String, String)>,
) -> Response {
    let service = translation_service(&app_state);
    match service.store().get(&language, &namespace, &key).await {
        Ok(value) => (
            StatusCode::OK,
            Json(ApiResponse::success(value, "Translation retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to read translation"),
    }
}

/// GET /api/translations/{language}/export
pub async fn export_language(State(app_state): State<AppState>, PathParams(language): PathParams<String>) -> Response {
    let service = translation_service(&app_state);
    match service.store().export(&language).await {
        Ok(namespaces) => (
            StatusCode::OK,
            Json(ApiResponse::success(namespaces, "Translations exported successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to export translations"),
    }
}

/// GET /api/translations/status
///
/// Per-language key counts and completion against the default language.
pub async fn translation_status(State(app_state): State<AppState>) -> Response {
    let service = translation_service(&app_state);
    match service.store().status(&config::default_language()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Translation status retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to compute translation status"),
    }
}

/// GET /api/translations/{language}/missing[?reference=en]
///
/// Keys present in the reference language (default language unless given)
/// but absent from `language`.
pub async fn missing_translations(
    State(app_state): State<AppState>,
    PathParams(language): PathParams<String>,
    QueryParams(params): QueryParams<MissingParams>,
) -> Response {
    let reference = params.reference.unwrap_or_else(config::default_language);
    let service = translation_service(&app_state);
    match service.store().missing(&language, &reference).await {
        Ok(missing) => (
            StatusCode::OK,
            Json(ApiResponse::success(missing, "Missing translations retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to compute missing translations"),
    }
}
