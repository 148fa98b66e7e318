//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{USER_SESSION_KEY, errors::into_status_error, handlers::AuthResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login Handler
///
/// Verifies credentials, binds the user to the caller's session, and
/// returns a bearer token for API use.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Authenticated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_uuid_or_500()?;
    let request = json.into_inner();

    let user = state
        .app
        .auth
        .verify_credentials(&request.username, &request.password)
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

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::auth::{AuthServiceError, IssuedApiToken, MockAuthService, User};

    use crate::test_helpers::auth_service;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_credentials()
            .once()
            .withf(|username, password| username == "alice" && password == "hunter2")
            .return_once(|_, _| {
                Ok(User {
                    uuid: Uuid::nil(),
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        auth.expect_issue_token().once().return_once(|user_uuid| {
            Ok(IssuedApiToken {
                token: "sf_v1_test.token".to_string(),
                token_uuid: Uuid::nil(),
                user_uuid,
            })
        });

        let body: AuthResponse = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "alice", "password": "hunter2" }))
            .send(&make_service(auth))
            .await
            .take_json()
            .await?;

        assert_eq!(body.username, "alice");
        assert_eq!(body.token, "sf_v1_test.token");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify_credentials()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        auth.expect_issue_token().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
