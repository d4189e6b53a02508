use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::{decode_row, decode_rows};
use crate::database::models::{Job, NewJob, JOB_FILTER_COLUMNS, JOB_UPDATE_FIELDS};
use crate::database::{DatabaseError, PartialUpdateBuilder, QueryExecutor};
use crate::filter::{FilterCriteria, FilterQueryBuilder};

const JOB_COLUMNS: &str = "id, title, salary, equity::float8 AS equity, company_handle";

pub struct JobService {
    db: Arc<dyn QueryExecutor>,
}

impl JobService {
    pub fn new(db: Arc<dyn QueryExecutor>) -> Self {
        Self { db }
    }

    /// Insert a job. Salary and equity may be absent; their placeholders are
    /// cast so a NULL binds as the column type.
    pub async fn create(&self, job: NewJob) -> Result<Job, DatabaseError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2::integer, $3::numeric, $4) RETURNING {}",
            JOB_COLUMNS
        );
        let params = [json!(job.title), json!(job.salary), json!(job.equity), json!(job.company_handle)];

        let row = self
            .db
            .fetch_optional(&sql, &params)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("INSERT returned no row".to_string()))?;
        decode_row(row)
    }

    /// List jobs ordered by title, narrowed by whichever criteria are present.
    pub async fn find_all(&self, criteria: &FilterCriteria) -> Result<Vec<Job>, DatabaseError> {
        if criteria.is_empty() {
            let sql = format!("SELECT {} FROM jobs ORDER BY title", JOB_COLUMNS);
            return decode_rows(self.db.fetch_all(&sql, &[]).await?);
        }

        let filter = FilterQueryBuilder::build(criteria, &JOB_FILTER_COLUMNS);
        let sql = format!("SELECT {} FROM jobs {} ORDER BY title", JOB_COLUMNS, filter.where_clause);
        decode_rows(self.db.fetch_all(&sql, &filter.values).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Job, DatabaseError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let row = self
            .db
            .fetch_optional(&sql, &[json!(id)])
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;
        decode_row(row)
    }

    pub async fn find_by_company(&self, handle: &str) -> Result<Vec<Job>, DatabaseError> {
        let sql = format!("SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY title", JOB_COLUMNS);
        decode_rows(self.db.fetch_all(&sql, &[json!(handle)]).await?)
    }

    /// Apply a sparse update. Unknown fields or an empty record are rejected
    /// before any SQL runs.
    pub async fn update(&self, id: i64, data: &Map<String, Value>) -> Result<Job, DatabaseError> {
        let update = PartialUpdateBuilder::build(data, &JOB_UPDATE_FIELDS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            update.set_clause,
            update.next_placeholder(),
            JOB_COLUMNS
        );

        let mut params = update.values;
        params.push(json!(id));

        let row = self
            .db
            .fetch_optional(&sql, &params)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;
        decode_row(row)
    }

    pub async fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        self.db
            .fetch_optional("DELETE FROM jobs WHERE id = $1 RETURNING id", &[json!(id)])
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;
        Ok(())
    }
}
