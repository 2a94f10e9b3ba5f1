use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityBatch, ValidationErrors};
use crate::store::{AppState, Domain, ResourceSlice};

/// A lookup value: case type, filing type, hearing type, task type,
/// collection method or component status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for RefType {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", self.name.trim().is_empty());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::RefTypes(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::RefTypes(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::CaseTypes => Some(&state.case_types),
            Domain::FilingTypes => Some(&state.filing_types),
            Domain::HearingTypes => Some(&state.hearing_types),
            Domain::TaskTypes => Some(&state.task_types),
            Domain::CollectionMethods => Some(&state.collection_methods),
            Domain::ComponentStatuses => Some(&state.component_statuses),
            _ => None,
        }
    }
}
