//! Shared sequence counter capability.

use std::sync::Arc;

use bytes::Bytes;
use object_store::ObjectStore;
use tracing::debug;

use crate::error::StorageError;

/// Capability over the persisted sequence counter.
///
/// `increment` advances the counter by one and returns the new value.
/// Implementations are injected into [`crate::SequenceIdIssuer`] so a
/// store with a native atomic increment can replace the default one
/// without touching the issuer.
#[async_trait::async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self) -> Result<u64, StorageError>;
}

/// Counter persisted as a text-encoded integer in the object store.
///
/// The increment is a plain read-modify-write: two processes can read
/// the same value and both write back, issuing overlapping sequence
/// numbers. Uniqueness is best-effort; an atomic conditional-write
/// implementation of [`CounterStore`] is the upgrade path.
pub struct ObjectCounterStore {
    store: Arc<dyn ObjectStore>,
    key: object_store::path::Path,
}

impl ObjectCounterStore {
    pub fn new(store: Arc<dyn ObjectStore>, key: &str) -> Self {
        Self {
            store,
            key: object_store::path::Path::from(key),
        }
    }

    /// Read the last issued value. A missing, unreachable, or
    /// unparseable counter object reads as 0.
    async fn read_current(&self) -> u64 {
        let result = match self.store.get(&self.key).await {
            Ok(r) => r,
            Err(e) => {
                debug!(key = %self.key, error = %e, "counter object not readable, treating as 0");
                return 0;
            }
        };
        match result.bytes().await {
            Ok(data) => String::from_utf8_lossy(&data).trim().parse().unwrap_or(0),
            Err(e) => {
                debug!(key = %self.key, error = %e, "counter body not readable, treating as 0");
                0
            }
        }
    }
}

#[async_trait::async_trait]
impl CounterStore for ObjectCounterStore {
    async fn increment(&self) -> Result<u64, StorageError> {
        let next = self.read_current().await + 1;
        let body = Bytes::from(next.to_string());
        match self.store.put(&self.key, body.into()).await {
            Ok(_) => Ok(next),
            Err(e) => Err(StorageError::CounterWriteFailed {
                value: next,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::local::LocalFileSystem;

    fn store_in(dir: &std::path::Path) -> Arc<dyn ObjectStore> {
        Arc::new(LocalFileSystem::new_with_prefix(dir).unwrap())
    }

    #[tokio::test]
    async fn missing_counter_starts_at_one() {
        let tmp = tempfile::tempdir().unwrap();
        let counter = ObjectCounterStore::new(store_in(tmp.path()), "system/counter.txt");
        assert_eq!(counter.increment().await.unwrap(), 1);
        assert_eq!(counter.increment().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn existing_counter_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store
            .put(
                &object_store::path::Path::from("system/counter.txt"),
                Bytes::from_static(b"41").into(),
            )
            .await
            .unwrap();

        let counter = ObjectCounterStore::new(store, "system/counter.txt");
        assert_eq!(counter.increment().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn garbage_counter_resets_to_one() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        store
            .put(
                &object_store::path::Path::from("system/counter.txt"),
                Bytes::from_static(b"not a number").into(),
            )
            .await
            .unwrap();

        let counter = ObjectCounterStore::new(store, "system/counter.txt");
        assert_eq!(counter.increment().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn value_round_trips_as_text() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let counter = ObjectCounterStore::new(store.clone(), "system/counter.txt");
        counter.increment().await.unwrap();
        counter.increment().await.unwrap();

        let body = store
            .get(&object_store::path::Path::from("system/counter.txt"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(&body[..], b"2");
    }
}
