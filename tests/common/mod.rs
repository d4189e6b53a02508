#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use jobly_api::auth::TokenCodec;
use jobly_api::testing::MemoryExecutor;
use jobly_api::{router, AppState};

pub const SECRET: &[u8] = b"integration-test-secret";

/// Router wired to a recording executor instead of Postgres.
pub struct TestApp {
    pub db: Arc<MemoryExecutor>,
    pub codec: TokenCodec,
    router: Router,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        let db = Arc::new(MemoryExecutor::new());
        let state = AppState::new(TokenCodec::new(SECRET, None)?, db.clone());
        Ok(Self {
            db,
            codec: TokenCodec::new(SECRET, None)?,
            router: router(state),
        })
    }

    pub fn token_for(&self, username: &str, is_admin: bool) -> Result<String> {
        Ok(self.codec.issue(username, Some(is_admin))?)
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, token, None).await
    }
}
