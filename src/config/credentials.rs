//! Credential resolution from configuration and persisted session state.
//!
//! This module provides secure handling of basic-auth credentials and
//! bearer tokens resolved at request time.

use thiserror::Error;

use super::types::AuthConfig;

/// Authentication scheme for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No `Authorization` header.
    #[default]
    None,
    /// `Authorization: Basic` from configured credentials.
    Basic,
    /// `Authorization: Bearer` from the persisted login token.
    Bearer,
}

/// Missing credentials for an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Basic auth credentials are not configured")]
    MissingBasicCredentials,
    #[error("No auth token found, please log in")]
    MissingToken,
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Resolved basic-auth pair.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecureString,
}

impl AuthConfig {
    /// Resolve the configured basic-auth credentials.
    ///
    /// Both halves must be present and non-empty.
    pub fn basic_credentials(&self) -> Result<BasicCredentials, CredentialError> {
        match (&self.basic_username, &self.basic_password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Ok(BasicCredentials {
                    username: user.clone(),
                    password: SecureString::new(pass.clone()),
                })
            }
            _ => Err(CredentialError::MissingBasicCredentials),
        }
    }
}
