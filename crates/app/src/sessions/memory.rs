//! In-memory session store.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::sessions::store::SessionStore;

/// Process-local session store.
///
/// Entries live until cleared or until the process exits. Access is
/// serialized by the inner lock, which is the only cross-request
/// coordination session state gets.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<FxHashMap<Uuid, FxHashMap<String, String>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session: Uuid, key: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(&session)
            .and_then(|values| values.get(key).cloned())
    }

    async fn set(&self, session: Uuid, key: &str, value: String) {
        self.sessions
            .write()
            .await
            .entry(session)
            .or_default()
            .insert(key.to_string(), value);
    }

    async fn remove(&self, session: Uuid, key: &str) {
        let mut sessions = self.sessions.write().await;

        if let Some(values) = sessions.get_mut(&session) {
            values.remove(key);

            if values.is_empty() {
                sessions.remove(&session);
            }
        }
    }

    async fn clear(&self, session: Uuid) {
        self.sessions.write().await.remove(&session);
    }
}
