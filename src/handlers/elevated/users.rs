use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::NewUser;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, IntoApiResponse};

/// GET /users
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let users = state.users().find_all().await?;
    Ok(json!({ "users": users }).into_api_response())
}

/// POST /users - admin-created account, may itself be an admin
pub async fn create(State(state): State<AppState>, ApiJson(new_user): ApiJson<NewUser>) -> ApiResult<Value> {
    let is_admin = new_user.is_admin.unwrap_or(false);
    let user = state.users().create(new_user, is_admin).await?;
    let token = state.codec.issue(&user.username, Some(user.is_admin))?;
    Ok(ApiResponse::created(json!({ "user": user, "token": token })))
}
