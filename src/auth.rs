//! Login, logout and the database health check.
//!
//! These helpers do not dispatch lifecycle actions; they report failures
//! through [`ActionError`] and leave banners to the caller.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{unexpected, ActionError, Actions};
use crate::config::AuthMode;
use crate::http::{FetchOptions, Method};
use crate::models::ValidationErrors;
use crate::storage::{self, now_millis, UserDetails};
use crate::store::Action;

/// Token lifetime when the login response omits `expiration`.
pub const DEFAULT_TOKEN_MINUTES: i64 = 60;

const PING_CACHE_KEY: &str = "pingStatus";
const PING_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    /// Minutes until the token expires.
    #[serde(default)]
    expiration: Option<i64>,
    #[serde(default)]
    user_details: Option<UserDetails>,
}

/// A successful login, already persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user_details: UserDetails,
    /// Epoch millis after which the token is no longer valid.
    pub expires_at: i64,
}

impl Actions {
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, ActionError> {
        let mut errors = ValidationErrors::new();
        errors.require("username", username.trim().is_empty());
        errors.require("password", password.is_empty());
        errors.into_result().map_err(ActionError::Validation)?;

        let template = self
            .client()
            .endpoint("login")
            .map_err(|e| unexpected("login", e))?;
        let options = FetchOptions::new(Method::POST)
            .auth(AuthMode::Basic)
            .body(json!({ "username": username, "password": password }));

        let response = self
            .client()
            .fetch(&template, &options)
            .await
            .map_err(|e| unexpected("login", e))?;
        if let Some(message) = response.error_message() {
            tracing::warn!(username, status = response.status, "Login rejected");
            return Err(ActionError::Failed { message });
        }

        let login: LoginResponse =
            serde_json::from_value(response.body).map_err(|e| unexpected("login", e))?;
        let mut user_details = login.user_details.unwrap_or_default();
        if user_details.username.is_empty() {
            user_details.username = username.to_string();
        }
        let minutes = login.expiration.unwrap_or(DEFAULT_TOKEN_MINUTES);
        let expires_at = token_expiry(now_millis(), minutes);

        storage::persist_login(
            self.client().storage().as_ref(),
            &login.token,
            expires_at,
            &user_details,
        )
        .map_err(|e| unexpected("login", e))?;

        tracing::info!(username = %user_details.username, minutes, "Logged in");
        Ok(LoginOutcome {
            user_details,
            expires_at,
        })
    }

    /// Reset every slice and forget the persisted session, cached ping included.
    pub fn logout(&self) -> Result<(), ActionError> {
        self.store().dispatch(Action::user_logout());
        storage::clear_session(self.client().storage().as_ref())
            .map_err(|e| unexpected("logout", e))?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Ping the backend database. A successful answer is reused for a minute.
    pub async fn test_database(&self) -> Result<String, ActionError> {
        if let Some(cached) = self.session().get_item::<String>(PING_CACHE_KEY) {
            tracing::debug!("Using cached ping status");
            return Ok(cached);
        }

        let template = self
            .client()
            .endpoint("ping")
            .map_err(|e| unexpected("ping", e))?;
        let options = FetchOptions::new(Method::GET).auth(AuthMode::Basic);
        let response = self
            .client()
            .fetch(&template, &options)
            .await
            .map_err(|e| unexpected("ping", e))?;
        if let Some(message) = response.error_message() {
            return Err(ActionError::Failed { message });
        }

        let status = ping_status(&response.body);
        if let Err(e) = self.session().set_item(PING_CACHE_KEY, &status, PING_CACHE_TTL) {
            tracing::debug!(error = %e, "Failed to cache ping status");
        }
        Ok(status)
    }
}

/// Epoch millis `minutes` after `now`, clamped instead of overflowing.
fn token_expiry(now: i64, minutes: i64) -> i64 {
    now.saturating_add(minutes.saturating_mul(60_000))
}

fn ping_status(body: &Value) -> String {
    ["ping", "message", "status"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .or_else(|| body.as_str())
        .unwrap_or("OK")
        .to_string()
}
