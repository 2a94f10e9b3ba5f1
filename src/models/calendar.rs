use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityBatch, ValidationErrors};
use crate::store::{AppState, Domain, ResourceSlice};

/// A scheduled court hearing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HearingCalendar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub court_case_id: Option<i64>,
    #[serde(default)]
    pub hearing_type_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(default)]
    pub hearing_date: Option<String>,
    /// Present only when fetched with `is_include_extra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_calendars: Option<Vec<TaskCalendar>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for HearingCalendar {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn has_related_data(&self) -> bool {
        self.task_calendars.is_some()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("court_case_id", self.court_case_id.is_none());
        errors.require("hearing_type_id", self.hearing_type_id.is_none());
        errors.require("hearing_date", self.hearing_date.is_none());
        errors.require("component_status_id", self.component_status_id.is_none());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::HearingCalendars(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::HearingCalendars(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::HearingCalendars => Some(&state.hearing_calendars),
            _ => None,
        }
    }
}

/// A to-do tied to a hearing or a filing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskCalendar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub task_type_id: Option<i64>,
    #[serde(default)]
    pub hearing_calendar_id: Option<i64>,
    #[serde(default)]
    pub filing_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(default)]
    pub task_date: Option<String>,
    #[serde(default)]
    pub task_due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for TaskCalendar {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("task_type_id", self.task_type_id.is_none());
        errors.require("task_date", self.task_date.is_none());
        errors.require("task_due_date", self.task_due_date.is_none());
        errors.require("component_status_id", self.component_status_id.is_none());
        match (self.hearing_calendar_id, self.filing_id) {
            (None, None) => errors.add("hearing_calendar_id", "Hearing calendar or filing is required"),
            (Some(_), Some(_)) => errors.add("filing_id", "Select either a hearing calendar or a filing"),
            _ => {}
        }
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::TaskCalendars(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::TaskCalendars(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::TaskCalendars => Some(&state.task_calendars),
            _ => None,
        }
    }
}
