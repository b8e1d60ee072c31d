use axum::{
    body::{Body, to_bytes},
    http::Request,
    response::Response,
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use std::convert::Infallible;
use tempfile::TempDir;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::config::AppConfig;
use util::state::AppState;

use api::routes::routes;

pub const TEST_JWT_SECRET: &str = "trade-desk-test-secret";

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Router over a fresh in-memory database and an empty translation root.
///
/// Keep the returned `TempDir` alive for as long as the test touches
/// translations.
pub async fn make_test_app() -> (TestApp, AppState, TempDir) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);

    let translations = TempDir::new().expect("failed to create tempdir");
    let app_state = AppState::new(setup_test_db().await).with_translations_root(translations.path());

    let router = axum::Router::new().nest("/api", routes(app_state.clone()));

    (router.into_service().boxed_clone(), app_state, translations)
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
