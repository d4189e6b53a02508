use axum::Extension;
use serde_json::{json, Value};

use crate::auth::Identity;
use crate::middleware::{ApiResult, IntoApiResponse};

/// GET /auth/whoami - echo the identity carried by the caller's token
pub async fn whoami(Extension(identity): Extension<Identity>) -> ApiResult<Value> {
    Ok(json!({ "username": identity.username, "isAdmin": identity.is_admin }).into_api_response())
}
