use axum::http::{header, HeaderMap};
use thiserror::Error;

use super::token::{Claims, TokenCodec};

/// Verified identity attached to a single in-flight request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Guard rejection. Deliberately carries no detail about which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
}

/// Extract the token from an `Authorization: Bearer <token>` value.
/// The scheme is matched case-insensitively.
pub fn bearer_token(value: &str) -> Option<&str> {
    let scheme = value.get(..7)?;
    if !scheme.eq_ignore_ascii_case("bearer ") {
        return None;
    }
    let token = value[7..].trim();
    (!token.is_empty()).then_some(token)
}

/// Soft authentication stage: never fails.
///
/// Returns the identity when a valid bearer token is present; an absent,
/// unreadable or invalid token all yield `None`.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Option<Identity> {
    let value = headers.get(header::AUTHORIZATION)?;

    let Ok(value) = value.to_str() else {
        tracing::debug!("Ignoring non-ASCII Authorization header");
        return None;
    };

    let Some(token) = bearer_token(value) else {
        tracing::debug!("Ignoring Authorization header without Bearer token");
        return None;
    };

    match codec.verify(token) {
        Ok(claims) => Some(Identity::from(claims)),
        Err(e) => {
            tracing::debug!("Treating request as anonymous: {}", e);
            None
        }
    }
}

pub fn require_logged_in(identity: Option<&Identity>) -> Result<&Identity, AuthError> {
    identity.ok_or(AuthError::Unauthorized)
}

pub fn require_admin(identity: Option<&Identity>) -> Result<&Identity, AuthError> {
    match identity {
        Some(identity) if identity.is_admin => Ok(identity),
        _ => Err(AuthError::Unauthorized),
    }
}

/// Pass when the caller owns the resource or is an admin.
///
/// `owner` must come from the route (e.g. the `:username` path segment), never
/// from the request body.
pub fn require_self_or_admin<'a>(
    identity: Option<&'a Identity>,
    owner: &str,
) -> Result<&'a Identity, AuthError> {
    let identity = require_logged_in(identity)?;
    if identity.username == owner || identity.is_admin {
        Ok(identity)
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// A privilege condition a route declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard<'a> {
    LoggedIn,
    Admin,
    SelfOrAdmin(&'a str),
}

impl Guard<'_> {
    pub fn check(&self, identity: Option<&Identity>) -> Result<(), AuthError> {
        match self {
            Guard::LoggedIn => require_logged_in(identity).map(|_| ()),
            Guard::Admin => require_admin(identity).map(|_| ()),
            Guard::SelfOrAdmin(owner) => require_self_or_admin(identity, owner).map(|_| ()),
        }
    }
}

/// Run guards left to right, stopping at the first rejection.
pub fn check_all(guards: &[Guard<'_>], identity: Option<&Identity>) -> Result<(), AuthError> {
    guards.iter().try_for_each(|guard| guard.check(identity))
}
