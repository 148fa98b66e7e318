//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    /// Confirmation message
    pub message: String,
}

/// Logout Handler
///
/// Drops all session state — the user binding and the cart alike.
#[endpoint(
    tags("auth"),
    summary = "Logout",
    responses(
        (status_code = StatusCode::OK, description = "Session cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_uuid_or_500()?;

    state.app.sessions.clear(session).await;

    Ok(Json(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::auth::MockAuthService;

    use crate::{
        auth::USER_SESSION_KEY,
        session::SESSION_COOKIE,
        test_helpers::{TEST_SESSION_UUID, auth_service_with_state, state_with_auth},
    };

    use super::*;

    #[tokio::test]
    async fn test_logout_clears_session_state() -> TestResult {
        let state = state_with_auth(MockAuthService::new());

        state
            .app
            .sessions
            .set(TEST_SESSION_UUID, USER_SESSION_KEY, "some-user".to_string())
            .await;

        let service = auth_service_with_state(
            state.clone(),
            Router::with_path("auth/logout").post(handler),
        );

        let body: LogoutResponse = TestClient::post("http://example.com/auth/logout")
            .add_header(
                "cookie",
                format!("{SESSION_COOKIE}={TEST_SESSION_UUID}"),
                true,
            )
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "Logged out");
        assert!(
            state
                .app
                .sessions
                .get(TEST_SESSION_UUID, USER_SESSION_KEY)
                .await
                .is_none(),
            "session user binding should be gone"
        );

        Ok(())
    }
}
