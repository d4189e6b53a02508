use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use sqlx::postgres::{PgArguments, PgDatabaseError, PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};

use super::error::DatabaseError;
use crate::config::DatabaseConfig;

/// Storage collaborator: runs SQL text with ordered bind values and returns
/// rows as JSON objects keyed by column name.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, DatabaseError>;

    async fn fetch_optional(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, DatabaseError> {
        Ok(self.fetch_all(sql, params).await?.into_iter().next())
    }
}

/// `QueryExecutor` over a Postgres pool
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool from configuration
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.url.as_deref().ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, DatabaseError> {
        tracing::debug!("SQL: {} ({} params)", sql, params.len());

        let mut q = sqlx::query(sql);
        for p in params {
            q = bind_param(q, p);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(classify)?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// SQLSTATE codes for values the database refuses (type, range and constraint failures).
const REJECTED_INPUT: &[&str] = &["42804", "22P02", "22003", "23502", "23503", "23514"];

fn classify(err: sqlx::Error) -> DatabaseError {
    if let Some(db_err) = err.as_database_error() {
        let code = db_err.code();
        let column = db_err.try_downcast_ref::<PgDatabaseError>().and_then(PgDatabaseError::column);
        if let Some(mapped) = classify_sqlstate(code.as_deref(), db_err.message(), column) {
            return mapped;
        }
    }
    DatabaseError::Sqlx(err)
}

/// Client-caused failures by SQLSTATE; `None` leaves the error opaque.
fn classify_sqlstate(code: Option<&str>, message: &str, column: Option<&str>) -> Option<DatabaseError> {
    match code? {
        "23505" => Some(DatabaseError::Conflict(message.to_string())),
        code if REJECTED_INPUT.contains(&code) => Some(DatabaseError::Rejected {
            message: message.to_string(),
            column: column.map(str::to_string),
        }),
        _ => None,
    }
}

/// How one JSON parameter goes over the wire.
#[derive(Debug, PartialEq)]
enum BindValue<'a> {
    /// Sent as a text NULL; typed columns cast their placeholder.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
    Json(&'a Value),
}

fn bind_value(v: &Value) -> BindValue<'_> {
    match v {
        Value::Null => BindValue::Null,
        Value::Bool(b) => BindValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BindValue::Int(i),
            // u64 beyond i64 and fractional numbers
            None => BindValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => BindValue::Text(s),
        Value::Array(_) | Value::Object(_) => BindValue::Json(v),
    }
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match bind_value(v) {
        BindValue::Null => q.bind(None::<String>),
        BindValue::Bool(b) => q.bind(b),
        BindValue::Int(i) => q.bind(i),
        BindValue::Float(f) => q.bind(f),
        BindValue::Text(s) => q.bind(s),
        BindValue::Json(json) => q.bind(json.clone()),
    }
}

fn row_to_json(row: &PgRow) -> Value {
    let mut record = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        record.insert(column.name().to_string(), column_value(row, i, column.type_info().name()));
    }
    Value::Object(record)
}

fn column_value(row: &PgRow, index: usize, type_name: &str) -> Value {
    match type_name {
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .and_then(|f| Number::from_f64(f64::from(f)))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index).ok().flatten().unwrap_or(Value::Null),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)
            .ok()
            .flatten()
            .map(|t| Value::String(t.to_rfc3339()))
            .unwrap_or(Value::Null),
        other => {
            tracing::debug!("Unsupported column type {} at index {}, returning null", other, index);
            Value::Null
        }
    }
}
