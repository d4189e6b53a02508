// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::{AuthError, TokenError};
use crate::database::{DatabaseError, SqlBuildError};
use crate::services::UserError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    /// 401 with a fixed body, whatever the cause.
    Unauthorized,

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized => "Unauthorized",
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });

        if let ApiError::ValidationError { field_errors: Some(field_errors), .. } = self {
            response["field_errors"] = json!(field_errors);
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::unauthorized(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            // Verification failures only ever reach clients through a guard
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::Expired => ApiError::unauthorized(),
            TokenError::MissingSecret | TokenError::Signing(_) => {
                tracing::error!("Token issuance failed: {}", err);
                ApiError::internal_server_error("Failed to issue token")
            }
        }
    }
}

impl From<SqlBuildError> for ApiError {
    fn from(err: SqlBuildError) -> Self {
        match err {
            SqlBuildError::NoData => ApiError::bad_request("No data"),
            SqlBuildError::UnknownField(field) => {
                let mut field_errors = HashMap::new();
                field_errors.insert(field.clone(), "Unknown field".to_string());
                ApiError::validation_error(format!("Unknown field: {}", field), Some(field_errors))
            }
            SqlBuildError::InvalidValue { field, expected } => {
                let message = format!("Invalid value for {}: expected {}", field, expected);
                let mut field_errors = HashMap::new();
                field_errors.insert(field, format!("Expected {}", expected));
                ApiError::validation_error(message, Some(field_errors))
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => {
                tracing::warn!("Unique constraint violation: {}", msg);
                ApiError::conflict("Record already exists")
            }
            DatabaseError::InvalidInput(e) => e.into(),
            DatabaseError::Rejected { message, column } => {
                tracing::info!("Database rejected input: {}", message);
                let field_errors = column.map(|column| HashMap::from([(column, "Invalid value".to_string())]));
                ApiError::validation_error(message, field_errors)
            }
            DatabaseError::ConfigMissing(key) => {
                tracing::error!("Database configuration missing: {}", key);
                ApiError::service_unavailable("Database not configured")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Database(e) => e.into(),
            UserError::Password(e) => {
                tracing::error!("{}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Body and query string rejections keep the JSON error shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON with a missing, unknown or mistyped field
            JsonRejection::JsonDataError(e) => ApiError::validation_error(e.body_text(), None),
            other => ApiError::bad_request(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_are_indistinguishable() {
        let messages: Vec<String> = [TokenError::Malformed, TokenError::InvalidSignature, TokenError::Expired]
            .into_iter()
            .map(|e| ApiError::from(e).to_json().to_string())
            .collect();

        assert!(messages.iter().all(|m| m == &messages[0]));
        assert_eq!(ApiError::from(AuthError::Unauthorized).to_json().to_string(), messages[0]);
    }

    #[test]
    fn unknown_field_names_the_field() {
        let err = ApiError::from(DatabaseError::InvalidInput(SqlBuildError::UnknownField("bogus".to_string())));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["bogus"], "Unknown field");
    }

    #[test]
    fn no_data_is_bad_request() {
        let err = ApiError::from(SqlBuildError::NoData);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No data");
    }

    #[test]
    fn storage_errors_are_masked() {
        let err = ApiError::from(DatabaseError::QueryError("relation \"jobs\" does not exist".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("jobs"));
    }

    #[test]
    fn invalid_value_names_the_field() {
        let err = ApiError::from(SqlBuildError::InvalidValue { field: "salary".to_string(), expected: "integer" });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_json();
        assert_eq!(body["message"], "Invalid value for salary: expected integer");
        assert_eq!(body["field_errors"]["salary"], "Expected integer");
    }

    #[test]
    fn rejected_values_are_client_errors() {
        let err = ApiError::from(DatabaseError::Rejected {
            message: "new row for relation \"jobs\" violates check constraint \"jobs_salary_check\"".to_string(),
            column: None,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = ApiError::from(DatabaseError::Rejected {
            message: "null value in column \"first_name\"".to_string(),
            column: Some("first_name".to_string()),
        });
        assert_eq!(err.to_json()["field_errors"]["first_name"], "Invalid value");
    }
}
