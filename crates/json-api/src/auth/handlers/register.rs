//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::auth::NewUser;

use crate::{
    auth::{USER_SESSION_KEY, errors::into_status_error, handlers::AuthResponse},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Register Handler
///
/// Creates an account, binds it to the caller's session, and returns a
/// bearer token for API use.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::OK, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Duplicate or invalid details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_uuid_or_500()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let issued = state
        .app
        .auth
        .issue_token(user.uuid)
        .await
        .map_err(into_status_error)?;

    state
        .app
        .sessions
        .set(session, USER_SESSION_KEY, user.uuid.to_string())
        .await;

    Ok(Json(AuthResponse {
        token: issued.token,
        username: user.username,
    }))
}
