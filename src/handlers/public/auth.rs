use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{LoginRequest, NewUser};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, IntoApiResponse};

/// POST /auth/token - exchange username/password for a token
///
/// Unknown user and wrong password produce the same 401.
pub async fn token(State(state): State<AppState>, ApiJson(login): ApiJson<LoginRequest>) -> ApiResult<Value> {
    let user = state
        .users()
        .authenticate(&login.username, &login.password)
        .await?
        .ok_or_else(|| {
            tracing::info!("Failed login for '{}'", login.username);
            ApiError::unauthorized()
        })?;

    let token = state.codec.issue(&user.username, Some(user.is_admin))?;
    Ok(json!({ "token": token }).into_api_response())
}

/// POST /auth/register - self-service signup, always non-admin
pub async fn register(State(state): State<AppState>, ApiJson(new_user): ApiJson<NewUser>) -> ApiResult<Value> {
    if new_user.is_admin == Some(true) {
        tracing::warn!("Ignoring isAdmin on self-registration of '{}'", new_user.username);
    }

    let user = state.users().create(new_user, false).await?;
    let token = state.codec.issue(&user.username, Some(user.is_admin))?;
    Ok(ApiResponse::created(json!({ "token": token })))
}
