use axum::extract::{Path, State};
use serde_json::{Map, Value};

use crate::app::AppState;
use crate::database::models::User;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, IntoApiResponse};

/// GET /users/:username
pub async fn get(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<User> {
    Ok(state.users().get(&username).await?.into_api_response())
}

/// PATCH /users/:username - sparse update of profile fields
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ApiJson(data): ApiJson<Map<String, Value>>,
) -> ApiResult<User> {
    Ok(state.users().update(&username, &data).await?.into_api_response())
}

/// DELETE /users/:username
pub async fn remove(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<Value> {
    state.users().remove(&username).await?;
    Ok(ApiResponse::deleted(username))
}
