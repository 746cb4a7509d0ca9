//! Order progress: stage catalog, status derivation and stepper presentation.
//!
//! Derivation and presentation are separate pure steps joined by an explicit
//! [`StatusMap`], so either can be tested without a terminal.

pub mod stage;
pub mod status;
pub mod stepper;

pub use stage::{CatalogError, Stage, StageCatalog};
pub use status::{derive, StageStatus, StatusMap};
pub use stepper::{render, Connector, NodeMarker, Orientation, StepNode, StepperTrack, StepperView};
