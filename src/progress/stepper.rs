//! Stepper presentation tree.
//!
//! Turns a catalog plus its status map into the nodes and connectors a
//! drawing layer needs. Nothing here touches a terminal.

use serde::{Deserialize, Serialize};

use super::stage::StageCatalog;
use super::status::{StageStatus, StatusMap};

/// Shown in place of the track when the catalog has no stages
pub const NO_STEPS_MESSAGE: &str = "No order steps defined.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Visual marker for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMarker {
    /// Filled, with a check
    Check,
    /// Animated active indicator
    Active,
    /// Empty outline
    Empty,
}

impl NodeMarker {
    pub fn for_status(status: StageStatus) -> Self {
        match status {
            StageStatus::Completed => NodeMarker::Check,
            StageStatus::InProgress => NodeMarker::Active,
            StageStatus::Pending => NodeMarker::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNode {
    pub stage_id: String,
    pub label: String,
    /// Only populated for the vertical layout
    pub description: Option<String>,
    pub status: StageStatus,
    pub marker: NodeMarker,
    /// Label drawn in the accent colour
    pub highlighted: bool,
}

/// Segment joining node `index` to node `index + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperTrack {
    pub orientation: Orientation,
    pub nodes: Vec<StepNode>,
    pub connectors: Vec<Connector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepperView {
    Placeholder { message: &'static str },
    Track(StepperTrack),
}

impl StepperView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, StepperView::Placeholder { .. })
    }

    pub fn track(&self) -> Option<&StepperTrack> {
        match self {
            StepperView::Track(track) => Some(track),
            StepperView::Placeholder { .. } => None,
        }
    }
}

/// Build the stepper view.
///
/// `statuses` is used as given and must come from the same catalog and
/// current stage; stages it does not mention render as pending.
pub fn render(
    catalog: &StageCatalog,
    current_stage_id: &str,
    statuses: &StatusMap,
    orientation: Orientation,
) -> StepperView {
    if catalog.is_empty() {
        return StepperView::Placeholder {
            message: NO_STEPS_MESSAGE,
        };
    }

    let status_of = |id: &str| statuses.get(id).unwrap_or(StageStatus::Pending);
    let current_index = catalog.position(current_stage_id);

    let nodes = catalog
        .iter()
        .map(|stage| {
            let status = status_of(&stage.id);
            StepNode {
                stage_id: stage.id.clone(),
                label: stage.name.clone(),
                description: match orientation {
                    Orientation::Vertical => stage.description.clone(),
                    Orientation::Horizontal => None,
                },
                status,
                marker: NodeMarker::for_status(status),
                highlighted: status.is_reached(),
            }
        })
        .collect();

    let stages = catalog.stages();
    let connectors = stages
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let before_current = current_index.is_some_and(|k| index < k);
            Connector {
                index,
                active: before_current || status_of(&pair[1].id).is_reached(),
            }
        })
        .collect();

    StepperView::Track(StepperTrack {
        orientation,
        nodes,
        connectors,
    })
}
