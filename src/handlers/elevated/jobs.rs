use axum::extract::{Path, State};
use serde_json::{Map, Value};

use crate::app::AppState;
use crate::database::models::{Job, NewJob};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, IntoApiResponse};

/// POST /jobs
pub async fn create(State(state): State<AppState>, ApiJson(new_job): ApiJson<NewJob>) -> ApiResult<Job> {
    let job = state.jobs().create(new_job).await?;
    tracing::info!("Created job {} for {}", job.id, job.company_handle);
    Ok(ApiResponse::created(job))
}

/// PATCH /jobs/:id - sparse update of title, salary, equity
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(data): ApiJson<Map<String, Value>>,
) -> ApiResult<Job> {
    Ok(state.jobs().update(id, &data).await?.into_api_response())
}

/// DELETE /jobs/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Value> {
    state.jobs().remove(id).await?;
    Ok(ApiResponse::deleted(id))
}
