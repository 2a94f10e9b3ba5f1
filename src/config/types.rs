use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Connection settings for the TrackCase service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL shared by every endpoint (e.g., "http://localhost:8080").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Retry policy for transient database-side failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Extra attempts after the first one (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between attempts in milliseconds (default: 3000).
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
    /// Response body fragment that marks a retryable failure.
    #[serde(default = "default_transient_marker")]
    pub transient_marker: String,
}

/// Credentials for endpoints protected by HTTP basic auth (login, ping).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub basic_username: Option<String>,
    #[serde(default)]
    pub basic_password: Option<String>,
}

/// Where persisted session keys live.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding `storage.json`. Defaults to `<data_dir>/trackcase`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the storage file path.
    pub fn file_path(&self) -> PathBuf {
        let dir = self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("trackcase")
        });
        dir.join("storage.json")
    }
}

/// Endpoint path templates keyed by endpoint name.
///
/// Templates may contain `{param}` tokens that are substituted per request.
/// Keys missing from the config file fall back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Endpoints(BTreeMap<String, String>);

impl Endpoints {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .or_else(|| default_endpoint(key))
    }

    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.0.insert(key.into(), template.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self(
            DEFAULT_ENDPOINTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Built-in endpoint templates.
pub const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    ("login", "/trackcase-service/users/user/login"),
    ("ping", "/trackcase-service/tests/ping"),
    ("court_cases", "/trackcase-service/court_cases/court_case"),
    ("clients", "/trackcase-service/clients/client"),
    ("judges", "/trackcase-service/judges/judge"),
    ("courts", "/trackcase-service/courts/court"),
    ("filings", "/trackcase-service/filings/filing"),
    ("hearing_calendars", "/trackcase-service/hearing_calendars/hearing_calendar"),
    ("task_calendars", "/trackcase-service/task_calendars/task_calendar"),
    ("case_collections", "/trackcase-service/collections/case_collection"),
    ("cash_collections", "/trackcase-service/collections/cash_collection"),
    ("case_types", "/trackcase-service/ref_types/case_type"),
    ("filing_types", "/trackcase-service/ref_types/filing_type"),
    ("hearing_types", "/trackcase-service/ref_types/hearing_type"),
    ("task_types", "/trackcase-service/ref_types/task_type"),
    ("collection_methods", "/trackcase-service/ref_types/collection_method"),
    ("component_statuses", "/trackcase-service/ref_types/component_status"),
];

fn default_endpoint(key: &str) -> Option<&'static str> {
    DEFAULT_ENDPOINTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_transient_marker() -> String {
    "too many connections for role".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_ms: default_retry_delay_ms(),
            transient_marker: default_transient_marker(),
        }
    }
}
