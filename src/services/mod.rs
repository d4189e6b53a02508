pub mod job_service;
pub mod user_service;

pub use job_service::JobService;
pub use user_service::{UserError, UserService};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::DatabaseError;

/// Decode a JSON row from the executor into a model.
fn decode_row<T: DeserializeOwned>(row: Value) -> Result<T, DatabaseError> {
    serde_json::from_value(row).map_err(|e| DatabaseError::QueryError(format!("Unexpected row shape: {}", e)))
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, DatabaseError> {
    rows.into_iter().map(decode_row).collect()
}
