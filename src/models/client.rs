use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityBatch, ValidationErrors};
use crate::store::{AppState, Domain, ResourceSlice};

/// A person the office represents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub a_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub judge_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Client {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", self.name.trim().is_empty());
        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !email.contains('@') {
                errors.add("email", "Invalid email address");
            }
        }
        errors.require("component_status_id", self.component_status_id.is_none());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::Clients(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::Clients(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::Clients => Some(&state.clients),
            _ => None,
        }
    }
}

/// An immigration judge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Judge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub webex: Option<String>,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Judge {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", self.name.trim().is_empty());
        errors.require("court_id", self.court_id.is_none());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::Judges(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::Judges(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::Judges => Some(&state.judges),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Court {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub dhs_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Court {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", self.name.trim().is_empty());
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::Courts(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::Courts(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::Courts => Some(&state.courts),
            _ => None,
        }
    }
}
