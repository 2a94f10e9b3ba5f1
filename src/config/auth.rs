//! Authentication header building for API requests.
//!
//! Builds the `Authorization` header for a request from the configured
//! basic-auth credentials or the persisted login token.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::credentials::{AuthMode, CredentialError};
use super::types::AuthConfig;
use crate::storage::{self, KeyValueStore};

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the authentication header for a request.
///
/// Returns `Ok(None)` when the mode needs no header, and an error when the
/// mode needs credentials that are not available.
pub fn build_auth_header(
    mode: AuthMode,
    auth: &AuthConfig,
    store: &dyn KeyValueStore,
) -> Result<Option<AuthHeader>, CredentialError> {
    match mode {
        AuthMode::None => Ok(None),
        AuthMode::Basic => {
            let creds = auth.basic_credentials()?;
            let encoded = STANDARD.encode(format!(
                "{}:{}",
                creds.username,
                creds.password.expose()
            ));
            Ok(Some(("Authorization".to_string(), format!("Basic {}", encoded))))
        }
        AuthMode::Bearer => {
            let token = storage::token(store).ok_or(CredentialError::MissingToken)?;
            Ok(Some(("Authorization".to_string(), format!("Bearer {}", token))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStoreExt, MemoryStorage};

    fn basic_auth() -> AuthConfig {
        AuthConfig {
            basic_username: Some("user".to_string()),
            basic_password: Some("pass".to_string()),
        }
    }

    #[test]
    fn test_no_auth() {
        let store = MemoryStorage::new();
        assert!(build_auth_header(AuthMode::None, &AuthConfig::default(), &store)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_basic_header() {
        let store = MemoryStorage::new();
        let (name, value) = build_auth_header(AuthMode::Basic, &basic_auth(), &store)
            .unwrap()
            .unwrap();
        assert_eq!(name, "Authorization");
        // base64("user:pass")
        assert_eq!(value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_missing_credentials() {
        let store = MemoryStorage::new();
        assert_eq!(
            build_auth_header(AuthMode::Basic, &AuthConfig::default(), &store).unwrap_err(),
            CredentialError::MissingBasicCredentials
        );
    }

    #[test]
    fn test_bearer_header() {
        let store = MemoryStorage::new();
        store.set_item(crate::storage::TOKEN, "tok-456").unwrap();

        let (name, value) = build_auth_header(AuthMode::Bearer, &AuthConfig::default(), &store)
            .unwrap()
            .unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer tok-456");
    }

    #[test]
    fn test_bearer_missing_token() {
        let store = MemoryStorage::new();
        assert_eq!(
            build_auth_header(AuthMode::Bearer, &AuthConfig::default(), &store).unwrap_err(),
            CredentialError::MissingToken
        );
    }
}
