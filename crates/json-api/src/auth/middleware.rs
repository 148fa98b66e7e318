//! Auth middleware.
//!
//! Resolves the caller to a [`Principal`] from either scheme: a bearer
//! token in the `Authorization` header, or the user binding the login
//! handler stored against the session. Handlers downstream never see
//! which scheme was used.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use storefront_app::auth::{AuthServiceError, Principal};
use uuid::Uuid;

use crate::{auth::USER_SESSION_KEY, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let principal = if let Some(token) = extract_bearer_token(req) {
        match state.app.auth.authenticate_bearer(token).await {
            Ok(principal) => Some(principal),
            Err(AuthServiceError::NotFound | AuthServiceError::Token(_)) => {
                res.render(StatusError::unauthorized().brief("Invalid API token"));

                return;
            }
            Err(error) => {
                error!("failed to validate api token: {error}");

                res.render(StatusError::internal_server_error());

                return;
            }
        }
    } else {
        match session_principal(&state, depot).await {
            Ok(principal) => principal,
            Err(status_error) => {
                res.render(status_error);

                return;
            }
        }
    };

    let Some(principal) = principal else {
        res.render(StatusError::unauthorized().brief("Authentication required"));

        return;
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

/// Resolve the session's user binding, if the session has logged in.
async fn session_principal(
    state: &State,
    depot: &Depot,
) -> Result<Option<Principal>, StatusError> {
    let session = depot.session_uuid_or_500()?;

    let Some(raw) = state.app.sessions.get(session, USER_SESSION_KEY).await else {
        return Ok(None);
    };

    let Ok(user_uuid) = Uuid::try_parse(&raw) else {
        return Ok(None);
    };

    match state.app.auth.get_user(user_uuid).await {
        Ok(user) => Ok(Some(Principal {
            user_uuid: user.uuid,
            username: user.username,
        })),
        Err(AuthServiceError::NotFound) => Ok(None),
        Err(error) => {
            error!("failed to resolve session user: {error}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::auth::{MockAuthService, User};

    use crate::test_helpers::{TEST_SESSION_UUID, state_with_auth};

    use super::*;

    #[salvo::handler]
    async fn echo_principal(depot: &mut Depot, res: &mut Response) {
        let username = depot.principal_or_401().map_or_else(
            |_error| "missing".to_string(),
            |principal| principal.username.clone(),
        );

        res.render(username);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = state_with_auth(auth);

        let router = Router::new()
            .hoop(salvo::affix_state::inject(state))
            .hoop(crate::session::middleware)
            .hoop(handler)
            .push(Router::new().get(echo_principal));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_no_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_bearer_token_injects_principal() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| {
                Ok(Principal {
                    user_uuid: Uuid::nil(),
                    username: "alice".to_string(),
                })
            });

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "alice");

        Ok(())
    }

    #[tokio::test]
    async fn test_session_user_binding_injects_principal() -> TestResult {
        let user_uuid = Uuid::nil();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();
        auth.expect_get_user()
            .once()
            .withf(move |uuid| *uuid == user_uuid)
            .return_once(move |_| {
                Ok(User {
                    uuid: user_uuid,
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let state = state_with_auth(auth);

        state
            .app
            .sessions
            .set(TEST_SESSION_UUID, USER_SESSION_KEY, user_uuid.to_string())
            .await;

        let router = Router::new()
            .hoop(salvo::affix_state::inject(state))
            .hoop(crate::session::middleware)
            .hoop(handler)
            .push(Router::new().get(echo_principal));

        let mut res = TestClient::get("http://example.com")
            .add_header(
                "cookie",
                format!("{}={TEST_SESSION_UUID}", crate::session::SESSION_COOKIE),
                true,
            )
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "alice");

        Ok(())
    }
}
