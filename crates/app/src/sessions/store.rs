//! Session store contract.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

/// String key-value storage scoped to a single session.
///
/// Values are opaque strings; callers serialize their own state (the cart
/// service stores its mapping as JSON).
#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the value stored under `key` for the given session.
    async fn get(&self, session: Uuid, key: &str) -> Option<String>;

    /// Store a value for the given session, replacing any existing value.
    async fn set(&self, session: Uuid, key: &str, value: String);

    /// Remove a single key from the given session.
    async fn remove(&self, session: Uuid, key: &str);

    /// Drop all state held for the given session.
    async fn clear(&self, session: Uuid);
}
