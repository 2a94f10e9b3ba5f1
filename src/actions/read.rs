//! Cached list reads and single-record lookups.

use crate::http::Method;
use crate::models::{Entity, EntityBatch};
use crate::store::{Action, Domain, Payload, RequestMetadata, Verb};

use super::inflight::Ticket;
use super::resource::Resource;
use super::{domain_request, item_template, unexpected, ActionError, Actions};

/// How a list read treats the cached slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Skip the cache and always hit the network.
    pub force: bool,
    /// Paging, sorting and filters; part of the cache and dedup key.
    pub metadata: Option<RequestMetadata>,
}

impl ListOptions {
    pub fn forced() -> Self {
        Self {
            force: true,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

fn read_success(domain: Domain, batch: EntityBatch, metadata: Option<RequestMetadata>) -> Action {
    Action::success(domain, Verb::Read).with_payload(Payload::Batch { batch, metadata })
}

impl Actions {
    /// Load every record of a domain.
    ///
    /// A slice already fetched with the same metadata is served from memory
    /// without a network call. Identical concurrent reads share one request;
    /// when the shared request is abandoned by its own caller, a follower
    /// that is still live retries and takes over the fetch.
    pub async fn list<E: Entity>(
        &self,
        resource: Resource<E>,
        options: ListOptions,
    ) -> Result<Vec<E>, ActionError> {
        let domain = resource.domain();
        let metadata = options.metadata;

        let leader = loop {
            if !options.force {
                if let Some(items) = self.serve_cached::<E>(domain, metadata.as_ref()) {
                    return Ok(items);
                }
            }

            match self.in_flight.join((domain, metadata.clone())) {
                Ticket::Leader(leader) => break leader,
                Ticket::Follower(mut rx) => {
                    tracing::debug!(%domain, "Joining in-flight read");
                    let outcome = self
                        .guarded(async { rx.recv().await.unwrap_or(Err(ActionError::Cancelled)) })
                        .await;
                    match outcome {
                        Err(ActionError::Cancelled) if !self.scope.is_cancelled() => {
                            tracing::debug!(%domain, "Shared read abandoned, retrying");
                        }
                        outcome => return outcome.and_then(|batch| items_from_batch(domain, &batch)),
                    }
                }
            }
        };

        self.store.dispatch(Action::request(domain, Verb::Read));
        let result = self.guarded(self.fetch_list::<E>(domain, metadata.as_ref())).await;
        match &result {
            Ok(items) => self
                .store
                .dispatch(read_success(domain, E::into_batch(items.clone()), metadata)),
            Err(ActionError::Failed { message }) => self
                .store
                .dispatch(Action::failure(domain, Verb::Read, message.as_str())),
            Err(_) => {}
        }
        self.store.dispatch(Action::complete(domain));

        leader.finish(result.clone().map(E::into_batch));
        result
    }

    /// Replay a cached slice through the lifecycle, if one matches.
    fn serve_cached<E: Entity>(
        &self,
        domain: Domain,
        metadata: Option<&RequestMetadata>,
    ) -> Option<Vec<E>> {
        let items = self.store.select(|state| {
            E::slice(state, domain)
                .filter(|slice| slice.is_cached_for(metadata))
                .map(|slice| slice.data.clone())
        })?;
        tracing::debug!(%domain, count = items.len(), "Serving list from store");
        self.store.dispatch(Action::request(domain, Verb::Read));
        self.store.dispatch(read_success(
            domain,
            E::into_batch(items.clone()),
            metadata.cloned(),
        ));
        self.store.dispatch(Action::complete(domain));
        Some(items)
    }

    /// Find one record by id.
    ///
    /// The cached slice is checked first; when the record is missing, or
    /// `with_extra` is set and its related lists were never loaded, the full
    /// record is fetched. Nothing is dispatched and failures yield `None`.
    pub async fn get_one<E: Entity>(
        &self,
        resource: Resource<E>,
        id: i64,
        with_extra: bool,
    ) -> Option<E> {
        let domain = resource.domain();
        let cached = self
            .store
            .select(|state| E::slice(state, domain).and_then(|slice| slice.find(id)).cloned());
        if let Some(found) = cached {
            if !with_extra || found.has_related_data() {
                return Some(found);
            }
        }

        match self.guarded(self.fetch_one::<E>(domain, id)).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(%domain, id, error = %e, "Record lookup failed");
                None
            }
        }
    }

    async fn fetch_list<E: Entity>(
        &self,
        domain: Domain,
        metadata: Option<&RequestMetadata>,
    ) -> Result<Vec<E>, ActionError> {
        let context = format!("{} read", domain.key());
        let template = self
            .client
            .endpoint(domain.key())
            .map_err(|e| unexpected(&context, e))?;
        let options =
            domain_request(Method::GET).query(metadata.map(|m| m.to_query()).unwrap_or_default());

        let response = self
            .client
            .fetch(&template, &options)
            .await
            .map_err(|e| unexpected(&context, e))?;
        if let Some(message) = response.error_message() {
            return Err(ActionError::Failed { message });
        }
        response
            .field::<Vec<E>>(domain.key())
            .map_err(|e| unexpected(&context, e))
    }

    async fn fetch_one<E: Entity>(&self, domain: Domain, id: i64) -> Result<Option<E>, ActionError> {
        let context = format!("{} lookup", domain.key());
        let base = self
            .client
            .endpoint(domain.key())
            .map_err(|e| unexpected(&context, e))?;
        let options = domain_request(Method::GET)
            .path_param("id", id)
            .with_extra(true);

        let response = self
            .client
            .fetch(&item_template(&base), &options)
            .await
            .map_err(|e| unexpected(&context, e))?;
        if let Some(message) = response.error_message() {
            return Err(ActionError::Failed { message });
        }
        let items: Vec<E> = response
            .field(domain.key())
            .map_err(|e| unexpected(&context, e))?;
        Ok(items.into_iter().find(|item| item.id() == Some(id)))
    }
}

fn items_from_batch<E: Entity>(domain: Domain, batch: &EntityBatch) -> Result<Vec<E>, ActionError> {
    E::from_batch(batch)
        .map(<[E]>::to_vec)
        .ok_or_else(|| unexpected(&format!("{} read", domain.key()), "batch type mismatch"))
}
