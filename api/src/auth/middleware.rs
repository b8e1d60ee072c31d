use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use services::search_service::SearchContext;
use std::net::SocketAddr;
use tracing::info;

use crate::auth::claims::AuthUser;

async fn user_agent_of(parts: &mut Parts) -> Option<String> {
    TypedHeader::<UserAgent>::from_request_parts(parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string())
}

/// Logs method, path, IP address, user ID (if authenticated), origin, and user-agent
/// for each incoming HTTP request. Automatically skips CORS preflight `OPTIONS` requests.
///
/// ### Usage:
/// Apply this middleware globally using:
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
///
/// ### Fields Logged:
/// - `method`: HTTP method used (`GET`, `POST`, etc.)
/// - `path`: Requested URI path
/// - `ip`: Remote IP address of the client
/// - `user`: User ID if authenticated, `0` if not
/// - `user_type`: Actor kind carried by the token, if any
/// - `origin`: Value of the `Origin` header if present
/// - `user_agent`: Value of the `User-Agent` header if present
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let (mut parts, body) = req.into_parts();

    // Skip logging for preflight requests
    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return Ok(next.run(req).await);
    }

    let actor = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|user| user.actor());

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());

    let user_agent = user_agent_of(&mut parts).await;

    info!(
        method = ?parts.method,
        path = %parts.uri.path(),
        ip = %addr.ip(),
        user = actor.and_then(|a| a.id()).unwrap_or(0),
        user_type = actor.map(|a| a.actor_type().to_string()).unwrap_or_else(|| "anonymous".into()),
        origin = origin.unwrap_or_else(|| "unknown".into()),
        user_agent = user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Attaches a [`SearchContext`] to the request: the caller if a valid token is
/// present, plus client IP and user-agent. Never rejects.
///
/// The IP comes from `ConnectInfo` when the server was started with it, so
/// in-process test routers simply record no address.
pub async fn capture_search_context(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let actor = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|user| user.actor());

    let ip_address = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let user_agent = user_agent_of(&mut parts).await;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(SearchContext {
        actor,
        ip_address,
        user_agent,
    });
    next.run(req).await
}
