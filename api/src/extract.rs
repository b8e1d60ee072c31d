//! Body, query and path extractors that answer malformed input with the
//! JSON error envelope instead of axum's plain-text rejections.
//!
//! Every rejection becomes `400 { success: false, message }`, where the
//! message is axum's own description of what was wrong.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::response::Response;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::response::bad_request;

/// A JSON request body. A missing `Content-Type`, malformed JSON and values
/// of the wrong type are all `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(reject("body", rejection.body_text())),
        }
    }
}

/// Query-string parameters, e.g. `?page=abc` is a `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(reject("query", rejection.body_text())),
        }
    }
}

/// Path segments, e.g. `/support-tickets/abc` is a `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => Err(reject("path", rejection.body_text())),
        }
    }
}

fn reject(source: &'static str, reason: String) -> Response {
    warn!(source, reason = %reason, "Rejected malformed request");
    bad_request(reason)
}
