//! Configuration: TOML file, environment overrides and credentials.

mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{AuthMode, BasicCredentials, CredentialError, SecureString};
pub use loader::ConfigError;
pub use types::{
    ApiConfig, AuthConfig, Config, Endpoints, RetryConfig, StorageConfig, DEFAULT_ENDPOINTS,
};
