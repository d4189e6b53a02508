use std::env;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{TokenCodec, TokenError};

const DEVELOPMENT_SECRET: &str = "secret-dev";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// `None` issues tokens that never expire.
    pub jwt_max_age_hours: Option<u64>,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_max_age_hours", &self.jwt_max_age_hours)
            .finish()
    }
}

impl SecurityConfig {
    pub fn max_age(&self) -> Result<Option<Duration>, ConfigError> {
        self.jwt_max_age_hours
            .map(|hours| {
                i64::try_from(hours)
                    .ok()
                    .and_then(Duration::try_hours)
                    .ok_or(ConfigError::InvalidMaxAge(hours))
            })
            .transpose()
    }

    pub fn token_codec(&self) -> Result<TokenCodec, ConfigError> {
        Ok(TokenCodec::new(self.jwt_secret.as_bytes(), self.max_age()?)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set in {0:?}")]
    MissingSecret(Environment),

    #[error("JWT_MAX_AGE_HOURS={0} is out of range")]
    InvalidMaxAge(u64),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
        .validated()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = env::var("JOBLY_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_MAX_AGE_HOURS") {
            self.security.jwt_max_age_hours = match v.parse::<u64>() {
                Ok(0) => None,
                Ok(hours) => Some(hours),
                Err(_) => self.security.jwt_max_age_hours,
            };
        }

        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret(self.environment));
        }
        self.security.max_age()?;
        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3001,
                enable_cors: true,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_SECRET.to_string(),
                jwt_max_age_hours: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3001,
                enable_cors: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_max_age_hours: Some(24),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3001,
                enable_cors: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_max_age_hours: Some(4),
            },
        }
    }
}
