use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, EntityBatch, ValidationErrors};
use crate::store::{AppState, Domain, ResourceSlice};

/// Fee agreement for a court case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub court_case_id: Option<i64>,
    #[serde(default)]
    pub component_status_id: Option<i64>,
    #[serde(default)]
    pub quote_amount: f64,
    #[serde(default)]
    pub initial_payment: f64,
    #[serde(default)]
    pub collection_method_id: Option<i64>,
    /// Present only when fetched with `is_include_extra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_collections: Option<Vec<CashCollection>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CaseCollection {
    /// Quote minus everything collected or waived so far.
    pub fn balance(&self) -> Option<f64> {
        let payments = self.cash_collections.as_ref()?;
        let paid: f64 = payments
            .iter()
            .map(|c| c.collected_amount + c.waived_amount)
            .sum();
        Some(self.quote_amount - paid)
    }
}

impl Entity for CaseCollection {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn has_related_data(&self) -> bool {
        self.cash_collections.is_some()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("court_case_id", self.court_case_id.is_none());
        errors.require("component_status_id", self.component_status_id.is_none());
        if self.quote_amount <= 0.0 {
            errors.add("quote_amount", "Quote amount must be greater than zero");
        }
        if self.initial_payment < 0.0 || self.initial_payment > self.quote_amount {
            errors.add("initial_payment", "Initial payment must be between zero and the quote");
        }
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::CaseCollections(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::CaseCollections(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::CaseCollections => Some(&state.case_collections),
            _ => None,
        }
    }
}

/// A single payment against a case collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CashCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub case_collection_id: Option<i64>,
    #[serde(default)]
    pub collection_method_id: Option<i64>,
    #[serde(default)]
    pub collected_amount: f64,
    #[serde(default)]
    pub waived_amount: f64,
    #[serde(default)]
    pub collection_date: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for CashCollection {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("case_collection_id", self.case_collection_id.is_none());
        errors.require("collection_method_id", self.collection_method_id.is_none());
        errors.require("collection_date", self.collection_date.is_none());
        if self.collected_amount < 0.0 || self.waived_amount < 0.0 {
            errors.add("collected_amount", "Amounts cannot be negative");
        }
        errors.into_result()
    }

    fn into_batch(items: Vec<Self>) -> EntityBatch {
        EntityBatch::CashCollections(items)
    }

    fn from_batch(batch: &EntityBatch) -> Option<&[Self]> {
        match batch {
            EntityBatch::CashCollections(items) => Some(items),
            _ => None,
        }
    }

    fn slice(state: &AppState, domain: Domain) -> Option<&ResourceSlice<Self>> {
        match domain {
            Domain::CashCollections => Some(&state.cash_collections),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_needs_payments_loaded() {
        let mut collection = CaseCollection {
            quote_amount: 1000.0,
            ..Default::default()
        };
        assert_eq!(collection.balance(), None);

        collection.cash_collections = Some(vec![
            CashCollection {
                collected_amount: 300.0,
                ..Default::default()
            },
            CashCollection {
                collected_amount: 100.0,
                waived_amount: 50.0,
                ..Default::default()
            },
        ]);
        assert_eq!(collection.balance(), Some(550.0));
    }

    #[test]
    fn initial_payment_bounded_by_quote() {
        let collection = CaseCollection {
            court_case_id: Some(1),
            component_status_id: Some(1),
            quote_amount: 100.0,
            initial_payment: 150.0,
            ..Default::default()
        };
        assert!(collection.validate().unwrap_err().get("initial_payment").is_some());
    }
}
