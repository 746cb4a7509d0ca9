//! Stage catalog: the fixed, ordered list of phases an order moves through.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Stage ids of the built-in delivery flow
pub const CONFIRMED: &str = "confirmed";
pub const PREPARING: &str = "preparing";
pub const OUT_FOR_DELIVERY: &str = "outForDelivery";
pub const DELIVERED: &str = "delivered";

/// One named phase of an order's lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Stage {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Rejected catalog definitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("stage at position {position} has an empty id")]
    MissingId { position: usize },

    #[error("stage '{id}' has an empty name")]
    MissingName { id: String },

    #[error("stage id '{id}' appears more than once")]
    DuplicateId { id: String },
}

/// Immutable, validated, ordered sequence of stages.
///
/// Construction is the only place stage definitions are checked; everything
/// downstream assumes ids are non-empty and unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    pub fn new(stages: Vec<Stage>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(stages.len());
        for (position, stage) in stages.iter().enumerate() {
            if stage.id.trim().is_empty() {
                return Err(CatalogError::MissingId { position });
            }
            if stage.name.trim().is_empty() {
                return Err(CatalogError::MissingName {
                    id: stage.id.clone(),
                });
            }
            if !seen.insert(stage.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: stage.id.clone(),
                });
            }
        }
        Ok(Self { stages })
    }

    /// The standard delivery flow: confirmed, preparing, out for delivery, delivered
    pub fn delivery() -> Self {
        Self {
            stages: vec![
                Stage::new(CONFIRMED, "Order Confirmed")
                    .with_description("We have received your order."),
                Stage::new(PREPARING, "Preparing Food")
                    .with_description("The restaurant is preparing your meal."),
                Stage::new(OUT_FOR_DELIVERY, "Out for Delivery")
                    .with_description("Your order is on its way."),
                Stage::new(DELIVERED, "Delivered").with_description("Enjoy your meal!"),
            ],
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn first(&self) -> Option<&Stage> {
        self.stages.first()
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Zero-based position of the first stage with this id
    pub fn position(&self, stage_id: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.id == stage_id)
    }

    /// The stage after `stage_id`, if any. Unknown ids have no successor.
    pub fn next_after(&self, stage_id: &str) -> Option<&Stage> {
        self.position(stage_id).and_then(|i| self.stages.get(i + 1))
    }
}

impl<'a> IntoIterator for &'a StageCatalog {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_catalog_order() {
        let catalog = StageCatalog::delivery();
        let ids: Vec<_> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![CONFIRMED, PREPARING, OUT_FOR_DELIVERY, DELIVERED]);
        assert!(catalog.iter().all(|s| s.description.is_some()));
    }

    #[test]
    fn test_new_accepts_valid_stages() {
        let catalog =
            StageCatalog::new(vec![Stage::new("a", "Alpha"), Stage::new("b", "Beta")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position("b"), Some(1));
    }

    #[test]
    fn test_new_accepts_empty_catalog() {
        let catalog = StageCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
    }

    #[test]
    fn test_new_rejects_empty_id() {
        let err = StageCatalog::new(vec![Stage::new("a", "Alpha"), Stage::new("  ", "Blank")])
            .unwrap_err();
        assert_eq!(err, CatalogError::MissingId { position: 1 });
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = StageCatalog::new(vec![Stage::new("a", "")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingName {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let err = StageCatalog::new(vec![Stage::new("a", "One"), Stage::new("a", "Two")])
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_next_after() {
        let catalog = StageCatalog::delivery();
        assert_eq!(catalog.next_after(CONFIRMED).unwrap().id, PREPARING);
        assert!(catalog.next_after(DELIVERED).is_none());
        assert!(catalog.next_after("cancelled").is_none());
    }

    #[test]
    fn test_stage_deserializes_without_description() {
        let stage: Stage = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(stage, Stage::new("x", "X"));
    }
}
