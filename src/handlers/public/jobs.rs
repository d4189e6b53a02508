use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{Job, JobQuery};
use crate::filter::FilterCriteria;
use crate::middleware::{ApiQuery, ApiResult, IntoApiResponse};

/// GET /jobs?title=&minSalary=&hasEquity= - list jobs, optionally filtered
pub async fn list(State(state): State<AppState>, ApiQuery(query): ApiQuery<JobQuery>) -> ApiResult<Value> {
    let criteria = FilterCriteria::from(query);
    let jobs = state.jobs().find_all(&criteria).await?;
    Ok(json!({ "jobs": jobs }).into_api_response())
}

/// GET /jobs/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Job> {
    Ok(state.jobs().get(id).await?.into_api_response())
}

/// GET /companies/:handle/jobs
pub async fn by_company(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<Value> {
    let jobs = state.jobs().find_by_company(&handle).await?;
    Ok(json!({ "jobs": jobs }).into_api_response())
}
