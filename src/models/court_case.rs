use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    CaseCollection, Entity, EntityBatch, Filing, HearingCalendar, TaskCalendar, ValidationErrors,
};
use crate::store::{AppState, Domain, ResourceSlice};

/// A client's matter before a court.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourtCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub case_type_id: Option<i64>,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(default)]
    pub comments: Option<String>,
    /// Present only when fetched with `is_include_extra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filings: Option<Vec<Filing>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hearing_calendars: Option<Vec<HearingCalendar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_calendars: Option<Vec<TaskCalendar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_collections: Option<Vec<CaseCollection>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for CourtCase {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn has_related_data(&self) -> bool {
        self.filings.is_some() && self.hearing_calendars.is_some()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("case_type_id", self.case_type_id.is_none());
        errors.require("client_id", self.client_id.is_none());
        errors.require("component_status_id", self.component_status_id.is_none());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::CourtCases(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::CourtCases(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::CourtCases => Some(&state.court_cases),
            _ => None,
        }
    }
}
