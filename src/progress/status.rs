//! Per-stage status derivation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::stage::StageCatalog;

/// Where a single stage stands relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageStatus {
    Pending,
    InProgress,
    Completed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::InProgress => "inProgress",
            StageStatus::Completed => "completed",
        }
    }

    /// Progress has reached this stage (it is current or already done)
    pub fn is_reached(&self) -> bool {
        matches!(self, StageStatus::InProgress | StageStatus::Completed)
    }
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total mapping from stage id to status for one catalog.
///
/// Only [`derive`] builds these; there is no way to patch an entry, so a
/// new current stage always means a new map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StatusMap {
    statuses: BTreeMap<String, StageStatus>,
}

impl StatusMap {
    pub fn get(&self, stage_id: &str) -> Option<StageStatus> {
        self.statuses.get(stage_id).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.statuses.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StageStatus)> {
        self.statuses.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Id of the stage marked in progress, if any
    pub fn in_progress(&self) -> Option<&str> {
        self.iter()
            .find(|(_, status)| *status == StageStatus::InProgress)
            .map(|(id, _)| id)
    }

    pub fn count(&self, status: StageStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }
}

/// Compute the status of every stage in `catalog` given the current stage id.
///
/// Stages before the current one are completed, the current one is in
/// progress and later ones are pending. An id that matches no stage leaves
/// every stage pending.
pub fn derive(catalog: &StageCatalog, current_stage_id: &str) -> StatusMap {
    let current = catalog.position(current_stage_id);

    let statuses = catalog
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let status = match current {
                Some(k) if index < k => StageStatus::Completed,
                Some(k) if index == k => StageStatus::InProgress,
                _ => StageStatus::Pending,
            };
            (stage.id.clone(), status)
        })
        .collect();

    StatusMap { statuses }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::stage::{
        Stage, CONFIRMED, DELIVERED, OUT_FOR_DELIVERY, PREPARING,
    };
    use std::collections::BTreeSet;

    fn statuses_in_order(catalog: &StageCatalog, map: &StatusMap) -> Vec<StageStatus> {
        catalog.iter().map(|s| map.get(&s.id).unwrap()).collect()
    }

    #[test]
    fn test_preparing_scenario() {
        let catalog = StageCatalog::delivery();
        let map = derive(&catalog, PREPARING);
        assert_eq!(map.get(CONFIRMED), Some(StageStatus::Completed));
        assert_eq!(map.get(PREPARING), Some(StageStatus::InProgress));
        assert_eq!(map.get(OUT_FOR_DELIVERY), Some(StageStatus::Pending));
        assert_eq!(map.get(DELIVERED), Some(StageStatus::Pending));
    }

    #[test]
    fn test_delivered_scenario() {
        let catalog = StageCatalog::delivery();
        let map = derive(&catalog, DELIVERED);
        assert_eq!(
            statuses_in_order(&catalog, &map),
            vec![
                StageStatus::Completed,
                StageStatus::Completed,
                StageStatus::Completed,
                StageStatus::InProgress,
            ]
        );
    }

    #[test]
    fn test_unknown_stage_leaves_everything_pending() {
        let catalog = StageCatalog::delivery();
        let map = derive(&catalog, "unknown");
        assert_eq!(map.len(), 4);
        assert_eq!(map.count(StageStatus::Pending), 4);
        assert_eq!(map.count(StageStatus::InProgress), 0);
        assert_eq!(map.count(StageStatus::Completed), 0);
        assert!(map.in_progress().is_none());
    }

    #[test]
    fn test_every_position_of_every_length() {
        for n in 1..=6 {
            let stages = (0..n)
                .map(|i| Stage::new(format!("s{}", i), format!("Stage {}", i)))
                .collect();
            let catalog = StageCatalog::new(stages).unwrap();

            for k in 0..n {
                let map = derive(&catalog, &format!("s{}", k));
                for (i, stage) in catalog.iter().enumerate() {
                    let expected = match i.cmp(&k) {
                        std::cmp::Ordering::Less => StageStatus::Completed,
                        std::cmp::Ordering::Equal => StageStatus::InProgress,
                        std::cmp::Ordering::Greater => StageStatus::Pending,
                    };
                    assert_eq!(map.get(&stage.id), Some(expected), "n={} k={} i={}", n, k, i);
                }
                assert_eq!(map.in_progress(), Some(format!("s{}", k).as_str()));
            }
        }
    }

    #[test]
    fn test_keys_match_catalog_ids() {
        let catalog = StageCatalog::delivery();
        let expected: BTreeSet<_> = catalog.iter().map(|s| s.id.as_str()).collect();
        for current in [CONFIRMED, DELIVERED, "unknown", ""] {
            let map = derive(&catalog, current);
            let keys: BTreeSet<_> = map.keys().collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_derive_is_deterministic() {
        let catalog = StageCatalog::delivery();
        let first = derive(&catalog, OUT_FOR_DELIVERY);
        let second = derive(&catalog, OUT_FOR_DELIVERY);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().collect::<Vec<_>>(),
            second.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_catalog_gives_empty_map() {
        let map = derive(&StageCatalog::default(), CONFIRMED);
        assert!(map.is_empty());
    }

    #[test]
    fn test_status_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&StageStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(StageStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_map_serializes_as_plain_object() {
        let map = derive(&StageCatalog::delivery(), PREPARING);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["confirmed"], "completed");
        assert_eq!(json["preparing"], "inProgress");
        assert_eq!(json["delivered"], "pending");
    }

    #[test]
    fn test_is_reached() {
        assert!(StageStatus::Completed.is_reached());
        assert!(StageStatus::InProgress.is_reached());
        assert!(!StageStatus::Pending.is_reached());
    }
}
