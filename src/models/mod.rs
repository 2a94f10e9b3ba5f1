//! Business records exchanged with the TrackCase service.
//!
//! The protocol layer treats these as opaque payloads keyed by a
//! server-assigned `id`; unknown fields are carried through untouched.

mod calendar;
mod client;
mod collection;
mod court_case;
mod filing;
mod ref_type;

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{AppState, Domain, ResourceSlice};

pub use calendar::{HearingCalendar, TaskCalendar};
pub use client::{Client, Court, Judge};
pub use collection::{CaseCollection, CashCollection};
pub use court_case::CourtCase;
pub use filing::Filing;
pub use ref_type::RefType;

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    /// Record `field` as required when `missing` holds.
    pub fn require(&mut self, field: &str, missing: bool) {
        if missing {
            self.add(field, "This field is required");
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A fetched list of records for one domain.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityBatch {
    CourtCases(Vec<CourtCase>),
    Clients(Vec<Client>),
    Judges(Vec<Judge>),
    Courts(Vec<Court>),
    Filings(Vec<Filing>),
    HearingCalendars(Vec<HearingCalendar>),
    TaskCalendars(Vec<TaskCalendar>),
    CaseCollections(Vec<CaseCollection>),
    CashCollections(Vec<CashCollection>),
    RefTypes(Vec<RefType>),
}

impl EntityBatch {
    pub fn len(&self) -> usize {
        match self {
            EntityBatch::CourtCases(v) => v.len(),
            EntityBatch::Clients(v) => v.len(),
            EntityBatch::Judges(v) => v.len(),
            EntityBatch::Courts(v) => v.len(),
            EntityBatch::Filings(v) => v.len(),
            EntityBatch::HearingCalendars(v) => v.len(),
            EntityBatch::TaskCalendars(v) => v.len(),
            EntityBatch::CaseCollections(v) => v.len(),
            EntityBatch::CashCollections(v) => v.len(),
            EntityBatch::RefTypes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record type managed through the request lifecycle.
pub trait Entity:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Server-assigned identity; `None` before creation.
    fn id(&self) -> Option<i64>;

    /// Whether related records requested with `is_include_extra` are present.
    fn has_related_data(&self) -> bool {
        true
    }

    /// Client-side checks run before any create/update request.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch;

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]>;

    /// The store slice holding this type for `domain`, if it owns one.
    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>>;
}
