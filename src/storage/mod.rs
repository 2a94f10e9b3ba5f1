//! Persisted key/value storage for session state.
//!
//! Values are JSON-serialized strings under well-known keys, mirroring
//! browser local storage. [`FileStorage`] persists them to disk,
//! [`MemoryStorage`] keeps them in-process, and [`SessionStorage`] adds
//! per-entry expiry on top of any store.

mod account;
mod file;
mod memory;
mod session;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use account::{
    clear_force_logout, clear_session, is_force_logout, is_logged_in, persist_login,
    set_force_logout, token, user_details, username, UserDetails,
};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use session::SessionStorage;

pub const TOKEN: &str = "token";
pub const TOKEN_EXPIRATION: &str = "tokenExpiration";
pub const USER_DETAILS: &str = "userDetails";
pub const FORCE_LOGOUT: &str = "forceLogout";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String-valued key/value store.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Option<String>;

    fn set_raw(&self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON helpers available on every store.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and deserialize a value. Missing or undecodable entries are `None`.
    fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable storage entry");
                None
            }
        }
    }

    fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// Current time as unix milliseconds.
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
