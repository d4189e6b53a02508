use serde::{Deserialize, Serialize};

use crate::database::field_map::{Column, FieldMapper};

/// Fields a user (or an admin on their behalf) may change.
/// `username` and `isAdmin` are deliberately absent.
pub const USER_UPDATE_FIELDS: FieldMapper = FieldMapper::new(&[
    ("firstName", Column::text("first_name")),
    ("lastName", Column::text("last_name")),
    ("email", Column::text("email")),
    ("password", Column::text("password")),
]);

/// Public view of a user row. The password hash is never selected into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(rename = "firstName", alias = "first_name")]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "isAdmin", alias = "is_admin")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
