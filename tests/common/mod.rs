//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use trackcase::actions::Actions;
use trackcase::config::Config;
use trackcase::http::HttpClient;
use trackcase::storage::{self, KeyValueStore, MemoryStorage, UserDetails};
use trackcase::store::{Action, Store};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER: &str = "jdoe";

/// Config pointing at `base_url` with a short retry delay.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    config.api.connect_timeout_seconds = 2;
    config.retry.delay_ms = 20;
    config.auth.basic_username = Some("svc".to_string());
    config.auth.basic_password = Some("secret".to_string());
    config
}

/// Storage holding a live token and user details.
pub fn logged_in_storage() -> Arc<MemoryStorage> {
    let store = Arc::new(MemoryStorage::new());
    let details = UserDetails {
        username: TEST_USER.to_string(),
        ..UserDetails::default()
    };
    storage::persist_login(
        store.as_ref(),
        TEST_TOKEN,
        storage::now_millis() + 60_000,
        &details,
    )
    .expect("persist login");
    store
}

pub fn make_client(config: Config, kv: Arc<dyn KeyValueStore>) -> HttpClient {
    HttpClient::new(config, kv).expect("client")
}

/// Actions wired to a fresh store and a logged-in session.
pub fn make_actions(base_url: &str) -> Actions {
    make_actions_with(base_url, logged_in_storage())
}

pub fn make_actions_with(base_url: &str, kv: Arc<dyn KeyValueStore>) -> Actions {
    let client = make_client(test_config(base_url), kv);
    Actions::new(Store::new(), Arc::new(client))
}

/// Records the type name of every dispatched action.
pub fn record_actions(store: &Store) -> Arc<Mutex<Vec<String>>> {
    record_with(store, |a| a.type_name())
}

pub fn record_with<T: Send + 'static>(
    store: &Store,
    f: impl Fn(&Action) -> T + Send + Sync + 'static,
) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |a| sink.lock().push(f(a)));
    seen
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
