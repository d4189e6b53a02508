use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use jobly_api::config::AppConfig;
use jobly_api::database::PgExecutor;
use jobly_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobly_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    let codec = config.security.token_codec().context("failed to build token codec")?;
    if codec.max_age().is_none() {
        tracing::warn!("JWT_MAX_AGE_HOURS unset: issued tokens never expire");
    }
    let executor = PgExecutor::connect_lazy(&config.database).context("failed to configure database pool")?;
    let state = AppState::new(codec, Arc::new(executor));

    let app = router(state);
    let app = if config.api.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
