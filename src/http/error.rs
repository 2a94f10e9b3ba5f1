//! Error types for the HTTP client wrapper.

use thiserror::Error;

use crate::config::CredentialError;

/// Errors that abort a request before or while it is on the wire.
///
/// Server-reported failures are not errors at this layer: they come back as
/// an [`ApiResponse`](super::ApiResponse) with a non-success status.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A username header was required but no user is logged in.
    #[error("Username is required but no logged-in user was found")]
    MissingUsername,

    /// Required credentials are missing.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// No template is configured for the endpoint key.
    #[error("Endpoint '{key}' is not configured")]
    UnknownEndpoint { key: String },

    /// A `{param}` token had no value.
    #[error("Missing path parameter '{param}' for '{template}'")]
    MissingPathParam { param: String, template: String },

    /// The base URL or template does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to reach the server or read its response.
    #[error("Request to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Building the underlying client failed.
    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] reqwest::Error),
}

impl HttpError {
    /// Whether the request never left the process.
    pub fn is_pre_flight(&self) -> bool {
        !matches!(self, HttpError::Connection { .. })
    }
}
