//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use uuid::Uuid;

use storefront_app::auth::Principal;

const PRINCIPAL_KEY: &str = "storefront.principal";
const SESSION_UUID_KEY: &str = "storefront.session_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Deposit the authenticated principal for downstream handlers.
    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated principal, or 401 when the auth middleware did
    /// not run or did not authenticate the request.
    fn principal_or_401(&self) -> Result<&Principal, StatusError>;

    /// Deposit the caller's session UUID.
    fn insert_session_uuid(&mut self, session: Uuid);

    /// The caller's session UUID; the session middleware always provides
    /// one, so absence is a server error.
    fn session_uuid_or_500(&self) -> Result<Uuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.insert(PRINCIPAL_KEY, principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.get::<Principal>(PRINCIPAL_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn insert_session_uuid(&mut self, session: Uuid) {
        self.insert(SESSION_UUID_KEY, session);
    }

    fn session_uuid_or_500(&self) -> Result<Uuid, StatusError> {
        self.get::<Uuid>(SESSION_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}
