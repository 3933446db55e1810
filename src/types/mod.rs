//! Core types for Passcam

mod action;
mod guidance;
mod observation;
mod output;
mod photo;
mod snapshot;
mod state;

pub use action::{Action, CaptureEffect};
pub use guidance::{DebugLine, DimensionStatus, GuidanceCode};
pub use observation::{Geometry, Observation, Quality, Rect};
pub use output::CaptureOutput;
pub use photo::{CapturedPhoto, ShutterReleased};
pub use snapshot::{GeometryVerdict, QualityVerdict, ValiditySnapshot};
pub use state::{BoundsState, DetectionState};
