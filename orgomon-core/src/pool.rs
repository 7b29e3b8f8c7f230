//! src/pool.rs
//!
//! Caches one remote session per computer id for the life of the process.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::models::AccountDescriptor;
use crate::traits::{RemoteSession, SessionConnector};
use crate::Error;

type SessionSlot = Arc<OnceCell<Arc<dyn RemoteSession>>>;

/// Lazily opens and then reuses remote sessions, keyed by `computer_id`.
///
/// Acquisitions for different computers never block each other. Concurrent
/// acquisitions for the same unseen computer share a single `connect` call.
/// A failed connect leaves the slot empty, so the next acquire retries.
pub struct ConnectionPool {
    connector: Arc<dyn SessionConnector>,
    sessions: DashMap<String, SessionSlot>,
}

impl ConnectionPool {
    pub fn new(connector: Arc<dyn SessionConnector>) -> Self {
        Self {
            connector,
            sessions: DashMap::new(),
        }
    }

    pub async fn acquire(&self, account: &AccountDescriptor) -> Result<Arc<dyn RemoteSession>, Error> {
        // Clone the slot out so no map shard lock is held across the await.
        let slot: SessionSlot = self
            .sessions
            .entry(account.computer_id.clone())
            .or_default()
            .clone();

        if let Some(existing) = slot.get() {
            debug!("Reusing session for account #{}", account.index);
            return Ok(existing.clone());
        }

        let session = slot
            .get_or_try_init(|| async {
                info!("Opening session for account #{}", account.index);
                self.connector
                    .connect(&account.computer_id, &account.credential_key)
                    .await
            })
            .await?;
        Ok(session.clone())
    }

    /// Number of computers with an established session.
    pub fn len(&self) -> usize {
        self.sessions
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every tracked session. Remote sessions expire on their own.
    pub fn clear(&self) {
        let count = self.len();
        self.sessions.clear();
        info!("Connection pool cleared ({} sessions released)", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Connector {}
        #[async_trait]
        impl SessionConnector for Connector {
            async fn connect(
                &self,
                computer_id: &str,
                credential_key: &str,
            ) -> Result<Arc<dyn RemoteSession>, Error>;
        }
    }

    struct StubSession(String);

    #[async_trait]
    impl RemoteSession for StubSession {
        fn computer_id(&self) -> &str {
            &self.0
        }

        async fn screenshot(&self) -> Result<String, Error> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn second_acquire_reuses_handle() -> Result<(), Error> {
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .with(eq("comp-a"), eq("key-a"))
            .times(1)
            .returning(|id, _| Ok(Arc::new(StubSession(id.to_string())) as Arc<dyn RemoteSession>));

        let pool = ConnectionPool::new(Arc::new(connector));
        let account = AccountDescriptor::new(1, "key-a", "comp-a");

        let first = pool.acquire(&account).await?;
        let second = pool.acquire(&account).await?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(pool.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_connect_is_retried_next_time() -> Result<(), Error> {
        let mut connector = MockConnector::new();
        let mut seq = mockall::Sequence::new();
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::Remote("down".into())));
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id, _| Ok(Arc::new(StubSession(id.to_string())) as Arc<dyn RemoteSession>));

        let pool = ConnectionPool::new(Arc::new(connector));
        let account = AccountDescriptor::new(1, "k", "comp-b");

        assert!(pool.acquire(&account).await.is_err());
        assert!(pool.is_empty());
        let session = pool.acquire(&account).await?;
        assert_eq!(session.computer_id(), "comp-b");
        Ok(())
    }

    #[tokio::test]
    async fn clear_forgets_sessions() -> Result<(), Error> {
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .times(2)
            .returning(|id, _| Ok(Arc::new(StubSession(id.to_string())) as Arc<dyn RemoteSession>));

        let pool = ConnectionPool::new(Arc::new(connector));
        let account = AccountDescriptor::new(7, "k", "comp-c");
        pool.acquire(&account).await?;
        pool.clear();
        assert!(pool.is_empty());
        pool.acquire(&account).await?;
        Ok(())
    }
}
