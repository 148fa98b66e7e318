//! Carts service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error("stored cart contents could not be decoded")]
    Corrupt(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CartsServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}

impl From<serde_json::Error> for CartsServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Corrupt(error)
    }
}
