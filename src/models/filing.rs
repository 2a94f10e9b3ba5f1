use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityBatch, ValidationErrors};
use crate::store::{AppState, Domain, ResourceSlice};

/// A form filed with a court or agency on behalf of a case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub filing_type_id: Option<i64>,
    #[serde(default)]
    pub court_case_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(default)]
    pub submit_date: Option<String>,
    #[serde(default)]
    pub receipt_date: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub priority_date: Option<String>,
    #[serde(default)]
    pub rfe_date: Option<String>,
    #[serde(default)]
    pub rfe_submit_date: Option<String>,
    #[serde(default)]
    pub decision_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Filing {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("filing_type_id", self.filing_type_id.is_none());
        errors.require("court_case_id", self.court_case_id.is_none());
        errors.require("component_status_id", self.component_status_id.is_none());
        if self.rfe_submit_date.is_some() && self.rfe_date.is_none() {
            errors.add("rfe_date", "RFE date is required when RFE submit date is set");
        }
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::Filings(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::Filings(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::Filings => Some(&state.filings),
            _ => None,
        }
    }
}
