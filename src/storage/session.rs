use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{now_millis, KeyValueStore, KeyValueStoreExt, StorageError};

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
    /// Unix milliseconds after which the entry is considered absent.
    expiry: i64,
}

/// Short-lived storage whose entries carry an expiry.
///
/// Values are wrapped as `{data, expiry}`. Reading an expired entry returns
/// `None` and drops it from the underlying store.
#[derive(Clone)]
pub struct SessionStorage {
    inner: Arc<dyn KeyValueStore>,
}

impl SessionStorage {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let envelope: Envelope<T> = self.inner.get_item(key)?;
        if envelope.expiry <= now_millis() {
            if let Err(e) = self.inner.remove(key) {
                tracing::debug!(key, error = %e, "Failed to drop expired session entry");
            }
            return None;
        }
        Some(envelope.data)
    }

    pub fn set_item<T: Serialize>(
        &self,
        key: &str,
        data: T,
        ttl: Duration,
    ) -> Result<(), StorageError> {
        let envelope = Envelope {
            data,
            expiry: now_millis() + ttl.as_millis() as i64,
        };
        self.inner.set_item(key, &envelope)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
