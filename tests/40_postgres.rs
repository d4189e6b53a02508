//! Runs the services against a real Postgres. Skipped unless
//! `TEST_DATABASE_URL` is set; each run gets its own schema.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Map, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};

use jobly_api::database::models::{NewJob, NewUser};
use jobly_api::database::{DatabaseError, PgExecutor};
use jobly_api::services::{JobService, UserError, UserService};

const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

struct Scratch {
    admin: PgPool,
    pool: PgPool,
    schema: String,
}

impl Scratch {
    async fn open() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };

        let schema = format!("jobly_test_{}_{}", std::process::id(), NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed));
        let admin = PgPoolOptions::new().max_connections(1).connect(&url).await?;
        admin.execute(format!("CREATE SCHEMA {}", schema).as_str()).await?;

        let options = PgConnectOptions::from_str(&url)?.options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new().max_connections(2).connect_with(options).await?;
        pool.execute(SCHEMA).await?;
        pool.execute("INSERT INTO companies (handle, name, description) VALUES ('acme', 'Acme', 'Anvils')")
            .await?;

        Ok(Some(Self { admin, pool, schema }))
    }

    fn executor(&self) -> Arc<PgExecutor> {
        Arc::new(PgExecutor::new(self.pool.clone()))
    }

    async fn close(self) -> Result<()> {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await?;
        Ok(())
    }
}

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn job(title: &str, salary: Option<i64>, equity: Option<f64>, company: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        salary,
        equity,
        company_handle: company.to_string(),
    }
}

#[tokio::test]
async fn job_columns_take_nulls_and_numbers() -> Result<()> {
    let Some(db) = Scratch::open().await? else {
        return Ok(());
    };
    let jobs = JobService::new(db.executor());

    let created = jobs.create(job("Intern", None, None, "acme")).await?;
    assert_eq!(created.salary, None);
    assert_eq!(created.equity, None);

    let updated = jobs.update(created.id, &record(json!({ "salary": 50000, "equity": 0.5 }))).await?;
    assert_eq!(updated.salary, Some(50000));
    assert_eq!(updated.equity, Some(0.5));

    let cleared = jobs.update(created.id, &record(json!({ "salary": null, "equity": null }))).await?;
    assert_eq!(cleared.salary, None);
    assert_eq!(cleared.equity, None);

    db.close().await
}

#[tokio::test]
async fn constraint_failures_are_rejected_input() -> Result<()> {
    let Some(db) = Scratch::open().await? else {
        return Ok(());
    };
    let jobs = JobService::new(db.executor());

    let negative = jobs.create(job("Intern", Some(-1), None, "acme")).await;
    assert!(matches!(negative, Err(DatabaseError::Rejected { .. })), "{:?}", negative);

    let orphan = jobs.create(job("Intern", None, None, "nobody")).await;
    assert!(matches!(orphan, Err(DatabaseError::Rejected { .. })), "{:?}", orphan);

    let too_big = jobs.create(job("Intern", Some(i64::from(i32::MAX) + 1), None, "acme")).await;
    assert!(matches!(too_big, Err(DatabaseError::Rejected { .. })), "{:?}", too_big);

    db.close().await
}

#[tokio::test]
async fn duplicate_username_is_conflict() -> Result<()> {
    let Some(db) = Scratch::open().await? else {
        return Ok(());
    };
    let users = UserService::new(db.executor());
    let alice = || NewUser {
        username: "alice".to_string(),
        password: "password1".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        email: "alice@example.com".to_string(),
        is_admin: None,
    };

    users.create(alice(), false).await?;
    let again = users.create(alice(), false).await;
    assert!(matches!(again, Err(UserError::Database(DatabaseError::Conflict(_)))), "{:?}", again);

    let bad_email = users.update("alice", &record(json!({ "email": "nope" }))).await;
    assert!(matches!(bad_email, Err(UserError::Database(DatabaseError::Rejected { .. }))), "{:?}", bad_email);

    db.close().await
}
