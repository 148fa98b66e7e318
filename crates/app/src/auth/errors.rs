//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::token::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("token or user not found")]
    NotFound,

    #[error("token processing error")]
    Token(#[source] ApiTokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation | ErrorKind::ForeignKeyViolation) => Self::Sql(error),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}
