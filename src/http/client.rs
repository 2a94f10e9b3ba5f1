use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::Instrument;

use crate::config::{build_auth_header, AuthMode, Config};
use crate::http::error::HttpError;
use crate::http::response::ApiResponse;
use crate::http::url::build_url;
use crate::storage::{self, KeyValueStore};

/// Header carrying the logged-in username.
pub const USERNAME_HEADER: &str = "X-User-Name";

/// Per-request options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub path_params: Vec<(String, String)>,
    pub query_params: Vec<(String, String)>,
    /// Serialized as JSON unless the method is GET.
    pub body: Option<Value>,
    pub auth: AuthMode,
    pub include_username_header: bool,
    pub include_extra: bool,
    pub include_history: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path_params: Vec::new(),
            query_params: Vec::new(),
            body: None,
            auth: AuthMode::None,
            include_username_header: false,
            include_extra: false,
            include_history: false,
        }
    }
}

impl FetchOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn path_param(mut self, name: &str, value: impl ToString) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_username(mut self) -> Self {
        self.include_username_header = true;
        self
    }

    pub fn with_extra(mut self, include: bool) -> Self {
        self.include_extra = include;
        self
    }

    pub fn with_history(mut self, include: bool) -> Self {
        self.include_history = include;
        self
    }
}

/// HTTP client for the TrackCase service.
///
/// Wraps `reqwest` with endpoint templating, auth headers, the
/// transient-error retry policy and forced-logout bookkeeping.
pub struct HttpClient {
    client: Client,
    config: Config,
    storage: Arc<dyn KeyValueStore>,
}

impl HttpClient {
    pub fn new(config: Config, storage: Arc<dyn KeyValueStore>) -> Result<Self, HttpError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_seconds as u64))
            .timeout(Duration::from_secs(config.api.timeout_seconds as u64))
            .build()
            .map_err(HttpError::Setup)?;

        Ok(Self {
            client,
            config,
            storage,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    /// Template configured for an endpoint key.
    pub fn endpoint(&self, key: &str) -> Result<String, HttpError> {
        self.config
            .endpoints
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| HttpError::UnknownEndpoint {
                key: key.to_string(),
            })
    }

    /// Issue a request against `template` (relative to the base URL).
    ///
    /// Fails before touching the network when a required username or token is
    /// missing. A response whose body carries the transient marker is retried
    /// with a fixed delay; the last response is returned either way.
    pub async fn fetch(
        &self,
        template: &str,
        options: &FetchOptions,
    ) -> Result<ApiResponse, HttpError> {
        let username = if options.include_username_header {
            Some(storage::username(self.storage.as_ref()).ok_or(HttpError::MissingUsername)?)
        } else {
            None
        };
        let auth_header = build_auth_header(options.auth, &self.config.auth, self.storage.as_ref())?;

        let url = build_url(
            &self.config.api.base_url,
            template,
            &options.path_params,
            &options.query_params,
            options.include_extra,
            options.include_history,
        )?;

        let request_id = uuid::Uuid::new_v4();
        let span = tracing::debug_span!(
            "fetch",
            request_id = %request_id,
            method = %options.method,
            url = %url
        );

        async {
            let retry = &self.config.retry;
            let delay = Duration::from_millis(retry.delay_ms);
            let mut attempt: u32 = 0;

            loop {
                let (response, raw) = self
                    .send_once(&url, options, username.as_deref(), auth_header.as_ref())
                    .await?;

                if attempt < retry.max_retries && raw.contains(&retry.transient_marker) {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = retry.max_retries,
                        delay_ms = retry.delay_ms,
                        "Transient database error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }

                self.track_session(response.status);
                if !response.is_success() {
                    tracing::warn!(status = response.status, body = %response.body, "Request failed");
                }
                return Ok(response);
            }
        }
        .instrument(span)
        .await
    }

    async fn send_once(
        &self,
        url: &Url,
        options: &FetchOptions,
        username: Option<&str>,
        auth_header: Option<&(String, String)>,
    ) -> Result<(ApiResponse, String), HttpError> {
        let mut builder = self
            .client
            .request(options.method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(name) = username {
            builder = builder.header(USERNAME_HEADER, name);
        }
        if let Some((name, value)) = auth_header {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if options.method != Method::GET {
            if let Some(body) = &options.body {
                builder = builder.body(body.to_string());
            }
        }

        let connection = |source| HttpError::Connection {
            url: url.to_string(),
            source,
        };
        let resp = builder.send().await.map_err(connection)?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(connection)?;
        tracing::debug!(status, "Response received");

        Ok((ApiResponse::from_text(status, &text), text))
    }

    /// Maintain the `forceLogout` flag read by session-timeout handling.
    fn track_session(&self, status: u16) {
        let store = self.storage.as_ref();
        let result = if (200..300).contains(&status) {
            storage::clear_force_logout(store)
        } else if status == 401 {
            tracing::info!("Unauthorized response, flagging forced logout");
            storage::set_force_logout(store)
        } else {
            Ok(())
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to update forceLogout flag");
        }
    }
}
