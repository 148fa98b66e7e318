//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    errors::AuthServiceError,
    models::{IssuedApiToken, NewUser, Principal, User},
    password::{hash_password, verify_password},
    repository::PgAuthRepository,
    token::{
        ApiTokenVersion, TokenHmacKey, build_verifier_input, format_api_token,
        generate_api_token_secret, parse_api_token,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    key: TokenHmacKey,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, key: TokenHmacKey) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            key,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, new_user: NewUser) -> Result<User, AuthServiceError> {
        if new_user.username.trim().is_empty()
            || new_user.email.trim().is_empty()
            || new_user.password.is_empty()
        {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let password_hash = hash_password(&new_user.password);

        let row = self
            .repository
            .create_user(
                Uuid::now_v7(),
                &new_user.username,
                &new_user.email,
                &password_hash,
            )
            .await?;

        Ok(row.into_user())
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthServiceError> {
        let row = self
            .repository
            .find_user_by_username(username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &row.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(row.into_user())
    }

    async fn issue_token(&self, user_uuid: Uuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let verifier_input = build_verifier_input(&token_uuid, version, &user_uuid, &secret);
        let token_hash = self.key.hmac(&verifier_input)?;

        self.repository
            .create_api_token(token_uuid, user_uuid, version, &token_hash)
            .await?;

        Ok(IssuedApiToken {
            token,
            token_uuid,
            user_uuid,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        // Malformed tokens are indistinguishable from unknown ones.
        let parsed = parse_api_token(bearer_token).map_err(|_ignored| AuthServiceError::NotFound)?;

        let record = self
            .repository
            .find_active_api_token(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if record.uuid != parsed.token_uuid || record.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed.token_uuid,
            parsed.version,
            &record.user_uuid,
            &parsed.secret,
        );

        if !self.key.verify(&verifier_input, &record.token_hash)? {
            return Err(AuthServiceError::NotFound);
        }

        let user = self
            .repository
            .get_user(record.user_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(Principal {
            user_uuid: user.uuid,
            username: user.username,
        })
    }

    async fn get_user(&self, uuid: Uuid) -> Result<User, AuthServiceError> {
        self.repository
            .get_user(uuid)
            .await?
            .map(crate::auth::models::UserRow::into_user)
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a new user account with a digested password.
    async fn register(&self, new_user: NewUser) -> Result<User, AuthServiceError>;

    /// Check a username/password pair. Unknown users and wrong passwords
    /// are indistinguishable to the caller.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthServiceError>;

    /// Issue a new opaque bearer token for the given user.
    async fn issue_token(&self, user_uuid: Uuid) -> Result<IssuedApiToken, AuthServiceError>;

    /// Resolve a bearer token to its principal.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;

    /// Resolve a user uuid (from a session binding) to its user.
    async fn get_user(&self, uuid: Uuid) -> Result<User, AuthServiceError>;
}
