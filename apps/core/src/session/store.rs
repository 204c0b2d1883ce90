use async_trait::async_trait;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::model::Session;
use crate::error::AppError;

/// Defines the storage interface for conversation sessions.
///
/// The dialogue layer only sees this trait, so the backing table can be
/// swapped (bounded, evicting, persisted) without touching dialogue logic.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the session for `session_id`, creating an empty one on first reference.
    async fn load_or_create(&self, session_id: &str) -> Result<Session, AppError>;

    /// Writes back a session after a turn.
    async fn save(&self, session: Session) -> Result<(), AppError>;

    /// Deletes every session and returns how many were removed.
    async fn clear_all(&self) -> Result<usize, AppError>;

    /// Number of live sessions.
    async fn session_count(&self) -> Result<usize, AppError>;
}

/// Unbounded process-lifetime session table. No expiry.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load_or_create(&self, session_id: &str) -> Result<Session, AppError> {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return Ok(session.clone());
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!("Creating session {}", session_id);
            Session::new(session_id)
        });
        Ok(session.clone())
    }

    async fn save(&self, session: Session) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, AppError> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.len();
        sessions.clear();
        info!("Cleared {} sessions", removed);
        Ok(removed)
    }

    async fn session_count(&self) -> Result<usize, AppError> {
        Ok(self.sessions.read().await.len())
    }
}

/// Session table capped at a fixed number of sessions.
///
/// The least recently used session is evicted when a new one would exceed
/// the capacity; an evicted id starts over as a fresh session.
pub struct BoundedSessionStore {
    sessions: Mutex<LruCache<String, Session>>,
}

impl BoundedSessionStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }
}

#[async_trait]
impl SessionStore for BoundedSessionStore {
    async fn load_or_create(&self, session_id: &str) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(session_id) {
            return Ok(session.clone());
        }

        let session = Session::new(session_id);
        if let Some((evicted, _)) = sessions.push(session_id.to_string(), session.clone()) {
            if evicted != session_id {
                debug!("Evicted session {}", evicted);
            }
        }
        Ok(session)
    }

    async fn save(&self, session: Session) -> Result<(), AppError> {
        self.sessions.lock().await.put(session.id.clone(), session);
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, AppError> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.len();
        sessions.clear();
        info!("Cleared {} sessions", removed);
        Ok(removed)
    }

    async fn session_count(&self) -> Result<usize, AppError> {
        Ok(self.sessions.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_or_create_is_lazy_and_stable() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.session_count().await.unwrap(), 0);

        let mut session = store.load_or_create("a").await.unwrap();
        assert_eq!(session.message_count, 0);
        assert_eq!(store.session_count().await.unwrap(), 1);

        session.record_message("hola");
        store.save(session).await.unwrap();

        let again = store.load_or_create("a").await.unwrap();
        assert_eq!(again.message_count, 1);
        assert_eq!(store.session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_reports_count() {
        let store = InMemorySessionStore::new();
        for id in ["a", "b", "c"] {
            store.load_or_create(id).await.unwrap();
        }

        assert_eq!(store.clear_all().await.unwrap(), 3);
        assert_eq!(store.session_count().await.unwrap(), 0);
        assert_eq!(store.clear_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bounded_store_evicts_least_recent() {
        let store = BoundedSessionStore::new(NonZeroUsize::new(2).unwrap());

        let mut a = store.load_or_create("a").await.unwrap();
        a.record_message("hola");
        store.save(a).await.unwrap();
        store.load_or_create("b").await.unwrap();
        // touch "a" so "b" becomes the eviction candidate
        store.load_or_create("a").await.unwrap();
        store.load_or_create("c").await.unwrap();

        assert_eq!(store.session_count().await.unwrap(), 2);
        assert_eq!(store.load_or_create("a").await.unwrap().message_count, 1);
    }

    #[tokio::test]
    async fn test_bounded_store_evicted_session_restarts() {
        let store = BoundedSessionStore::new(NonZeroUsize::new(1).unwrap());

        let mut a = store.load_or_create("a").await.unwrap();
        a.record_message("hola");
        store.save(a).await.unwrap();
        store.load_or_create("b").await.unwrap();

        assert_eq!(store.load_or_create("a").await.unwrap().message_count, 0);
        assert_eq!(store.clear_all().await.unwrap(), 1);
    }
}
