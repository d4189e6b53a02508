//! In-memory storage double for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::database::{DatabaseError, QueryExecutor};

/// One statement as the executor received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Records every statement and answers with scripted row sets, in order.
/// Once the script runs out every statement returns no rows.
#[derive(Default)]
pub struct MemoryExecutor {
    queries: Mutex<Vec<RecordedQuery>>,
    responses: Mutex<VecDeque<Vec<Value>>>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next unanswered statement.
    pub fn respond_with(&self, rows: Vec<Value>) -> &Self {
        self.responses.lock().unwrap_or_else(|e| e.into_inner()).push_back(rows);
        self
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.queries().pop()
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, DatabaseError> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedQuery { sql: sql.to_string(), params: params.to_vec() });

        Ok(self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_default())
    }
}
