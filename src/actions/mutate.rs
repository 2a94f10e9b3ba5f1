//! Create, update and delete.

use crate::http::Method;
use crate::models::Entity;
use crate::store::{success_message, Action, Domain, Verb};

use super::resource::Resource;
use super::{domain_request, item_template, unexpected, ActionError, Actions};

impl Actions {
    /// Validate and POST a new record.
    ///
    /// On success the domain's cached list is invalidated so the next read
    /// refetches it.
    pub async fn create<E: Entity>(
        &self,
        resource: Resource<E>,
        record: &E,
    ) -> Result<(), ActionError> {
        record.validate().map_err(ActionError::Validation)?;
        self.mutate(resource.domain(), Verb::Create, None, Some(record))
            .await
    }

    /// Validate and PUT an existing record. The record must carry an id.
    pub async fn update<E: Entity>(
        &self,
        resource: Resource<E>,
        record: &E,
    ) -> Result<(), ActionError> {
        let mut errors = record.validate().err().unwrap_or_default();
        errors.require("id", record.id().is_none());
        errors.into_result().map_err(ActionError::Validation)?;
        self.mutate(resource.domain(), Verb::Update, record.id(), Some(record))
            .await
    }

    pub async fn delete<E: Entity>(&self, resource: Resource<E>, id: i64) -> Result<(), ActionError> {
        self.mutate::<E>(resource.domain(), Verb::Delete, Some(id), None)
            .await
    }

    async fn mutate<E: Entity>(
        &self,
        domain: Domain,
        verb: Verb,
        id: Option<i64>,
        record: Option<&E>,
    ) -> Result<(), ActionError> {
        self.store.dispatch(Action::request(domain, verb));
        let result = self.guarded(self.send_mutation(domain, verb, id, record)).await;
        match &result {
            Ok(()) => self
                .store
                .dispatch(Action::success(domain, verb).with_success(success_message(domain, verb))),
            Err(ActionError::Failed { message }) => self
                .store
                .dispatch(Action::failure(domain, verb, message.as_str())),
            Err(_) => {}
        }
        self.store.dispatch(Action::complete(domain));
        result
    }

    async fn send_mutation<E: Entity>(
        &self,
        domain: Domain,
        verb: Verb,
        id: Option<i64>,
        record: Option<&E>,
    ) -> Result<(), ActionError> {
        let context = format!("{} {}", domain.key(), verb.as_str().to_lowercase());
        let base = self
            .client
            .endpoint(domain.key())
            .map_err(|e| unexpected(&context, e))?;

        let method = match verb {
            Verb::Create => Method::POST,
            Verb::Update => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Read => Method::GET,
        };
        let mut options = domain_request(method);
        let template = match id {
            Some(id) => {
                options = options.path_param("id", id);
                item_template(&base)
            }
            None => base,
        };
        if let Some(record) = record {
            let body = serde_json::to_value(record).map_err(|e| unexpected(&context, e))?;
            options = options.body(body);
        }

        let response = self
            .client
            .fetch(&template, &options)
            .await
            .map_err(|e| unexpected(&context, e))?;
        match response.error_message() {
            Some(message) => Err(ActionError::Failed { message }),
            None => {
                tracing::info!(%domain, verb = verb.as_str(), "Mutation accepted");
                Ok(())
            }
        }
    }
}
