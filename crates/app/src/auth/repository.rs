//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Error, FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    models::{ApiTokenRecord, UserRow},
    token::ApiTokenVersion,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(
        &self,
        uuid: Uuid,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, Error> {
        query_as::<Postgres, UserRow>(CREATE_USER_SQL)
            .bind(uuid)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, Error> {
        query_as::<Postgres, UserRow>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_user(&self, uuid: Uuid) -> Result<Option<UserRow>, Error> {
        query_as::<Postgres, UserRow>(GET_USER_SQL)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        uuid: Uuid,
        user_uuid: Uuid,
        version: ApiTokenVersion,
        token_hash: &str,
    ) -> Result<(), Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(uuid)
            .bind(user_uuid)
            .bind(version.as_i16())
            .bind(token_hash)
            .bind(Option::<SqlxTimestamp>::None)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_api_token(
        &self,
        uuid: Uuid,
    ) -> Result<Option<ApiTokenRecord>, Error> {
        query_as::<Postgres, ApiTokenRecord>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version_i16: i16 = row.try_get("version")?;

        let version = ApiTokenVersion::try_from(version_i16).map_err(|e| Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            version,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
