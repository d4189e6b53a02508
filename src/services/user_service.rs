use std::sync::Arc;

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::{decode_row, decode_rows};
use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::database::models::{NewUser, User, USER_UPDATE_FIELDS};
use crate::database::{DatabaseError, PartialUpdateBuilder, QueryExecutor};

const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

pub struct UserService {
    db: Arc<dyn QueryExecutor>,
}

impl UserService {
    pub fn new(db: Arc<dyn QueryExecutor>) -> Self {
        Self { db }
    }

    /// Check credentials. `None` covers both unknown user and wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {}, password FROM users WHERE username = $1", USER_COLUMNS);
        let Some(row) = self.db.fetch_optional(&sql, &[json!(username)]).await? else {
            return Ok(None);
        };

        let stored = row.get("password").and_then(Value::as_str).unwrap_or_default();
        if !verify_password(password, stored) {
            return Ok(None);
        }
        decode_row(row).map(Some)
    }

    /// Insert a user with a freshly hashed password.
    pub async fn create(&self, user: NewUser, is_admin: bool) -> Result<User, UserError> {
        let hashed = hash_password(&user.password)?;
        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        let params = [
            json!(user.username),
            json!(hashed),
            json!(user.first_name),
            json!(user.last_name),
            json!(user.email),
            json!(is_admin),
        ];

        let row = self
            .db
            .fetch_optional(&sql, &params)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("INSERT returned no row".to_string()))?;
        Ok(decode_row(row)?)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
        decode_rows(self.db.fetch_all(&sql, &[]).await?)
    }

    pub async fn get(&self, username: &str) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = self
            .db
            .fetch_optional(&sql, &[json!(username)])
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))?;
        decode_row(row)
    }

    /// Sparse update; a supplied password is re-hashed before it is bound.
    pub async fn update(&self, username: &str, data: &Map<String, Value>) -> Result<User, UserError> {
        let mut data = data.clone();
        // A non-string password is left for the builder to reject
        if let Some(Value::String(plain)) = data.get_mut("password") {
            *plain = hash_password(plain)?;
        }

        let update = PartialUpdateBuilder::build(&data, &USER_UPDATE_FIELDS).map_err(DatabaseError::from)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {}",
            update.set_clause,
            update.next_placeholder(),
            USER_COLUMNS
        );

        let mut params = update.values;
        params.push(json!(username));

        let row = self
            .db
            .fetch_optional(&sql, &params)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))?;
        Ok(decode_row(row)?)
    }

    pub async fn remove(&self, username: &str) -> Result<(), DatabaseError> {
        self.db
            .fetch_optional("DELETE FROM users WHERE username = $1 RETURNING username", &[json!(username)])
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))?;
        Ok(())
    }
}
