//! Per-domain list cache with explicit fetch status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKind, Lifecycle, Payload, Verb};
use super::domain::Domain;
use super::reducer::{Reducer, Slice};
use crate::models::Entity;

/// Paging and filter parameters a list was fetched with.
///
/// Two reads with equal metadata are the same read; the slice only serves
/// from memory when the requested metadata matches the stored fetch key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RequestMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl RequestMetadata {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Query parameters in a stable order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(direction) = &self.sort_direction {
            query.push(("sort_direction".to_string(), direction.clone()));
        }
        for (k, v) in &self.filters {
            query.push((k.clone(), v.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    NotFetched,
    Fetching,
    Fetched,
}

/// Cached list for one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSlice<E> {
    pub status: FetchStatus,
    pub data: Vec<E>,
    pub fetch_key: Option<RequestMetadata>,
}

impl<E> Default for ResourceSlice<E> {
    fn default() -> Self {
        Self {
            status: FetchStatus::NotFetched,
            data: Vec::new(),
            fetch_key: None,
        }
    }
}

impl<E: Entity> Slice for ResourceSlice<E> {}

impl<E: Entity> ResourceSlice<E> {
    pub fn fetched(data: Vec<E>, fetch_key: Option<RequestMetadata>) -> Self {
        Self {
            status: FetchStatus::Fetched,
            data,
            fetch_key,
        }
    }

    /// Fetched, and with the same metadata as `key`.
    ///
    /// A fetched empty list still counts as cached.
    pub fn is_cached_for(&self, key: Option<&RequestMetadata>) -> bool {
        self.status == FetchStatus::Fetched && self.fetch_key.as_ref() == key
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.data.iter().find(|e| e.id() == Some(id))
    }
}

/// Reducer for the slice owned by one domain.
pub struct ResourceReducer<E> {
    domain: Domain,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Entity> ResourceReducer<E> {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            _entity: std::marker::PhantomData,
        }
    }
}

impl<E: Entity> Reducer for ResourceReducer<E> {
    type State = ResourceSlice<E>;

    fn reduce(&self, state: Self::State, action: &Action) -> Self::State {
        if action.domain() != Some(self.domain) {
            return state;
        }

        match action.kind {
            ActionKind::Lifecycle {
                verb: Verb::Read,
                phase: Lifecycle::Requested,
                ..
            } => ResourceSlice {
                status: FetchStatus::Fetching,
                ..state
            },
            ActionKind::Lifecycle {
                verb: Verb::Read,
                phase: Lifecycle::Succeeded,
                ..
            } => match &action.payload {
                Some(Payload::Batch { batch, metadata }) => match E::from_batch(batch) {
                    Some(items) => ResourceSlice::fetched(items.to_vec(), metadata.clone()),
                    None => {
                        tracing::warn!(domain = %self.domain, "Batch type does not match slice");
                        state
                    }
                },
                _ => state,
            },
            ActionKind::Lifecycle {
                verb: Verb::Read,
                phase: Lifecycle::Failed,
                ..
            } => ResourceSlice::default(),
            ActionKind::Lifecycle {
                verb,
                phase: Lifecycle::Succeeded,
                ..
            } if verb.is_mutation() => ResourceSlice::default(),
            // A read that ended without SUCCESS or FAILURE was cancelled.
            ActionKind::Complete { .. } if state.status == FetchStatus::Fetching => ResourceSlice {
                status: FetchStatus::NotFetched,
                ..state
            },
            _ => state,
        }
    }
}
