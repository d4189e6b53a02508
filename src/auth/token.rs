use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every identity token.
///
/// `isAdmin` is always written on issue. Tokens whose payload lacks the flag
/// decode as non-admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("JWT generation error: {0}")]
    Signing(String),
}

/// Issues and verifies HS256 identity tokens with an injected secret.
///
/// The codec holds no mutable state; share it behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    max_age: Option<Duration>,
}

impl TokenCodec {
    pub fn new(secret: &[u8], max_age: Option<Duration>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        // Expiry is checked against the injected clock in `verify_at`, so the
        // library only validates signature and shape here.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            max_age,
        })
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    pub fn issue(&self, username: &str, is_admin: Option<bool>) -> Result<String, TokenError> {
        self.issue_at(username, is_admin, Utc::now())
    }

    /// Sign a token for `username` as of `now`.
    ///
    /// A missing admin flag is normalized to `false`, never rejected.
    pub fn issue_at(
        &self,
        username: &str,
        is_admin: Option<bool>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let is_admin = is_admin.unwrap_or_else(|| {
            tracing::warn!("Token issued for '{}' without admin flag, defaulting to false", username);
            false
        });

        let iat = now.timestamp();
        let exp = match self.max_age {
            Some(age) => Some(
                iat.checked_add(age.num_seconds())
                    .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?,
            ),
            None => None,
        };
        let claims = Claims {
            username: username.to_string(),
            is_admin,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature, shape and expiry of `token` as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        let now = now.timestamp();
        if matches!(claims.exp, Some(exp) if now >= exp) {
            return Err(TokenError::Expired);
        }
        if let Some(max_age) = self.max_age {
            if now.saturating_sub(claims.iat) > max_age.num_seconds() {
                return Err(TokenError::Expired);
            }
        }

        Ok(claims)
    }
}
