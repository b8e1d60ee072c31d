use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use services::{Actor, ActorType};

// --- Actor Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

fn unauthenticated() -> GuardRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("Authentication required")),
    )
}

/// Helper to extract and validate the user, then insert it back into the request
/// together with the resolved [`Actor`].
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, Actor), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| unauthenticated())?;

    let actor = user.actor().ok_or_else(unauthenticated)?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    req.extensions_mut().insert(actor);
    Ok((req, actor))
}

/// Base guard that other actor guards build upon.
async fn allow_actor_types(
    req: Request<Body>,
    next: Next,
    allowed: &[ActorType],
    failure_msg: &str,
) -> Result<Response, GuardRejection> {
    let (req, actor) = extract_and_insert_authuser(req).await?;

    if !allowed.contains(&actor.actor_type()) {
        tracing::warn!(actor = ?actor, path = %req.uri().path(), "Actor type rejected");
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))));
    }

    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, _actor) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Trader-only guard.
pub async fn allow_trader(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_actor_types(req, next, &[ActorType::Trader], "Trader access required").await
}

/// Employee-only guard.
pub async fn allow_employee(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_actor_types(req, next, &[ActorType::Employee], "Employee access required").await
}

/// Employees and admins.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_actor_types(
        req,
        next,
        &[ActorType::Employee, ActorType::Admin],
        "Staff access required",
    )
    .await
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_actor_types(req, next, &[ActorType::Admin], "Admin access required").await
}
