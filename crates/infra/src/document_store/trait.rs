use std::sync::Arc;

use thiserror::Error;

/// Document store operation error.
///
/// Infrastructure failures only; a missing document is `Ok(None)`, not an
/// error.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("document (de)serialization failed: {0}")]
    Serialization(String),
}

/// Async key/document store.
///
/// - `get` returns `None` for unknown keys.
/// - `upsert` inserts or fully replaces the document under `key`.
/// - `list` returns every document in the collection (no ordering guarantee
///   beyond what the backend provides).
///
/// Concurrency control is whatever the backend offers natively; callers do
/// not lock.
#[async_trait::async_trait]
pub trait DocumentStore<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, DocumentStoreError>;

    async fn upsert(&self, key: K, value: V) -> Result<(), DocumentStoreError>;

    async fn list(&self) -> Result<Vec<V>, DocumentStoreError>;
}

#[async_trait::async_trait]
impl<K, V, S> DocumentStore<K, V> for Arc<S>
where
    K: Send + Sync + 'static,
    V: Send + 'static,
    S: DocumentStore<K, V> + ?Sized,
{
    async fn get(&self, key: &K) -> Result<Option<V>, DocumentStoreError> {
        (**self).get(key).await
    }

    async fn upsert(&self, key: K, value: V) -> Result<(), DocumentStoreError> {
        (**self).upsert(key, value).await
    }

    async fn list(&self) -> Result<Vec<V>, DocumentStoreError> {
        (**self).list().await
    }
}
