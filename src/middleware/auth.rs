use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{self, check_all, Guard, Identity};
use crate::error::ApiError;

/// Soft authentication layer, applied router-wide.
///
/// Attaches an `Identity` to the request extensions when a valid bearer token
/// is present and always passes the request on. An identity that is already
/// attached is never replaced.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if request.extensions().get::<Identity>().is_none() {
        if let Some(identity) = auth::authenticate(request.headers(), &state.codec) {
            tracing::debug!("Authenticated '{}' (admin: {})", identity.username, identity.is_admin);
            request.extensions_mut().insert(identity);
        }
    }

    next.run(request).await
}

fn guard(request: &Request, guards: &[Guard<'_>]) -> Result<(), ApiError> {
    let identity = request.extensions().get::<Identity>();
    check_all(guards, identity).map_err(|e| {
        tracing::warn!(
            "Rejected {} {} for {}",
            request.method(),
            request.uri().path(),
            identity.map_or("anonymous", |i| i.username.as_str())
        );
        ApiError::from(e)
    })
}

pub async fn require_logged_in(request: Request, next: Next) -> Result<Response, ApiError> {
    guard(&request, &[Guard::LoggedIn])?;
    Ok(next.run(request).await)
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    guard(&request, &[Guard::LoggedIn, Guard::Admin])?;
    Ok(next.run(request).await)
}

/// Owner is the `:username` path segment, matched by the router before this runs.
pub async fn require_self_or_admin(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let owner = params.get("username").ok_or_else(|| {
        tracing::error!("require_self_or_admin mounted on a route without :username");
        ApiError::unauthorized()
    })?;

    guard(&request, &[Guard::LoggedIn, Guard::SelfOrAdmin(owner)])?;
    Ok(next.run(request).await)
}
