//! Action creators: network calls wrapped in the request lifecycle.
//!
//! Every creator dispatches REQUEST, then exactly one of SUCCESS or FAILURE,
//! then COMPLETE. Failures never escape as panics or raw transport errors:
//! server-reported problems become a FAILURE carrying the server's message,
//! anything unexpected becomes a FAILURE carrying a generic message.

mod inflight;
mod mutate;
mod read;
pub mod resource;

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::AuthMode;
use crate::http::{FetchOptions, HttpClient, Method};
use crate::models::{EntityBatch, ValidationErrors};
use crate::storage::SessionStorage;
use crate::store::{Domain, RequestMetadata, Store, SOMETHING_WENT_WRONG};

pub use inflight::{InFlight, Leader, Ticket};
pub use read::ListOptions;
pub use resource::Resource;

/// Why an action creator did not succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Client-side validation failed; nothing was dispatched.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A FAILURE was dispatched with this message.
    #[error("{message}")]
    Failed { message: String },

    /// The caller's scope was cancelled; only COMPLETE was dispatched.
    #[error("Request cancelled")]
    Cancelled,
}

type ReadKey = (Domain, Option<RequestMetadata>);
type ReadOutcome = Result<EntityBatch, ActionError>;

/// Entry point for every store-backed operation.
///
/// Cheap to clone; clones share the store, client and in-flight map.
#[derive(Clone)]
pub struct Actions {
    store: Store,
    client: Arc<HttpClient>,
    in_flight: Arc<InFlight<ReadKey, ReadOutcome>>,
    session: SessionStorage,
    scope: CancellationToken,
}

impl Actions {
    /// Session-scoped entries such as the cached ping share the client's
    /// backing store, so they live as long as the persisted login does.
    pub fn new(store: Store, client: Arc<HttpClient>) -> Self {
        let session = SessionStorage::new(client.storage().clone());
        Self {
            store,
            client,
            in_flight: Arc::new(InFlight::new()),
            session,
            scope: CancellationToken::new(),
        }
    }

    /// A handle whose requests are abandoned once `scope` is cancelled,
    /// typically when the view that started them goes away.
    pub fn scoped(&self, scope: CancellationToken) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub(crate) fn session(&self) -> &SessionStorage {
        &self.session
    }

    /// Run `fut` unless the scope is cancelled first.
    async fn guarded<T>(
        &self,
        fut: impl Future<Output = Result<T, ActionError>>,
    ) -> Result<T, ActionError> {
        tokio::select! {
            biased;
            _ = self.scope.cancelled() => Err(ActionError::Cancelled),
            result = fut => result,
        }
    }
}

/// Options shared by every domain request: bearer token plus username header.
fn domain_request(method: Method) -> FetchOptions {
    FetchOptions::new(method)
        .auth(AuthMode::Bearer)
        .with_username()
}

/// Template addressing one record of a domain.
fn item_template(base: &str) -> String {
    format!("{}/{{id}}", base.trim_end_matches('/'))
}

/// Log an unexpected error and convert it to the generic FAILURE.
pub(crate) fn unexpected(context: &str, err: impl Display) -> ActionError {
    tracing::error!(context, error = %err, "Unexpected error");
    ActionError::Failed {
        message: SOMETHING_WENT_WRONG.to_string(),
    }
}
