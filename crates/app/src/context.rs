//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenHmacKey},
    database::{self, Db},
    domain::{
        carts::{CartsService, SessionCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    sessions::{MemorySessionStore, SessionStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        token_key: TokenHmacKey,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(SessionCartsService::new(
                db.clone(),
                Arc::clone(&sessions),
            )),
            orders: Arc::new(PgOrdersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, token_key)),
            sessions,
        })
    }

    /// Assemble a context from pre-built services.
    ///
    /// Handler tests use this to wire mock services behind a real router.
    #[must_use]
    pub fn from_parts(
        products: Arc<dyn ProductsService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        auth: Arc<dyn AuthService>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            products,
            carts,
            orders,
            auth,
            sessions,
        }
    }
}
