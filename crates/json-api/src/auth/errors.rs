//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Username or email already exists")
        }
        AuthServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Username, email and password are required")
        }
        AuthServiceError::InvalidCredentials | AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::Token(source) => {
            error!("failed to process api token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
