//! Auth Models

use jiff::Timestamp;
use uuid::Uuid;

use crate::auth::token::ApiTokenVersion;

/// User Model
///
/// The stored password digest never leaves the repository layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The identified caller, independent of the authentication scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_uuid: Uuid,
    pub username: String,
}

/// A freshly issued bearer token.
///
/// `token` is the only copy of the secret; the database stores just its
/// HMAC verifier.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub token_uuid: Uuid,
    pub user_uuid: Uuid,
}

/// Stored user row, including the password digest.
#[derive(Debug, Clone)]
pub(crate) struct UserRow {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl UserRow {
    pub(crate) fn into_user(self) -> User {
        User {
            uuid: self.uuid,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Stored token row.
#[derive(Debug, Clone)]
pub(crate) struct ApiTokenRecord {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
}
