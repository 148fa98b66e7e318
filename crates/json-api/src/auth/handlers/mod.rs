//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Response to a successful register or login: a bearer token for API
/// clients, while browser clients keep using the session cookie the
/// request was served with.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthResponse {
    /// Opaque bearer token
    pub token: String,

    /// The authenticated username
    pub username: String,
}
