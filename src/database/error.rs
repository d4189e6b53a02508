use thiserror::Error;

/// Rejections from the SQL fragment builders. These are client input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SqlBuildError {
    #[error("No data")]
    NoData,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidValue { field: String, expected: &'static str },
}

/// Errors from the storage collaborator
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The database refused a value: wrong type, out of range, or a
    /// NOT NULL / CHECK / foreign key constraint.
    #[error("Rejected: {message}")]
    Rejected { message: String, column: Option<String> },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    InvalidInput(#[from] SqlBuildError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
