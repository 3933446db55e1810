//! Aggregate validity state
//!
//! Key invariant: `has_valid_face` equals the AND of bounds, roll, pitch,
//! yaw and quality. Flags are only written through `apply_*` and every
//! write path ends in `recompute()` before the snapshot leaves the crate.

use serde::{Deserialize, Serialize};
use crate::types::{BoundsState, DetectionState};

/// Result of the geometry pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryVerdict {
    pub bounds_state: BoundsState,
    pub acceptable_roll: bool,
    pub acceptable_pitch: bool,
    pub acceptable_yaw: bool,
}

impl GeometryVerdict {
    /// Verdict for a missing or failed geometry reading
    pub const fn rejected() -> Self {
        Self {
            bounds_state: BoundsState::Unknown,
            acceptable_roll: false,
            acceptable_pitch: false,
            acceptable_yaw: false,
        }
    }

    pub fn acceptable_pose(&self) -> bool {
        self.acceptable_roll && self.acceptable_pitch && self.acceptable_yaw
    }
}

/// Result of the quality pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub acceptable_quality: bool,
}

impl QualityVerdict {
    pub const fn rejected() -> Self {
        Self { acceptable_quality: false }
    }
}

/// Per-dimension acceptability plus the derived "ready to capture" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValiditySnapshot {
    detection_state: DetectionState,
    bounds_state: BoundsState,
    acceptable_roll: bool,
    acceptable_pitch: bool,
    acceptable_yaw: bool,
    acceptable_quality: bool,
    /// Last quality reading passed the gate
    timer_on: bool,
    has_valid_face: bool,
}

impl Default for ValiditySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl ValiditySnapshot {
    /// No face seen yet, every check negative
    pub const fn new() -> Self {
        Self {
            detection_state: DetectionState::NoFace,
            bounds_state: BoundsState::Unknown,
            acceptable_roll: false,
            acceptable_pitch: false,
            acceptable_yaw: false,
            acceptable_quality: false,
            timer_on: false,
            has_valid_face: false,
        }
    }

    pub fn detection_state(&self) -> DetectionState {
        self.detection_state
    }

    pub fn bounds_state(&self) -> BoundsState {
        self.bounds_state
    }

    pub fn acceptable_roll(&self) -> bool {
        self.acceptable_roll
    }

    pub fn acceptable_pitch(&self) -> bool {
        self.acceptable_pitch
    }

    pub fn acceptable_yaw(&self) -> bool {
        self.acceptable_yaw
    }

    pub fn acceptable_pose(&self) -> bool {
        self.acceptable_roll && self.acceptable_pitch && self.acceptable_yaw
    }

    pub fn acceptable_quality(&self) -> bool {
        self.acceptable_quality
    }

    pub fn timer_on(&self) -> bool {
        self.timer_on
    }

    /// Ready to capture
    pub fn has_valid_face(&self) -> bool {
        self.has_valid_face
    }

    /// True when `has_valid_face` agrees with its constituents
    pub fn is_consistent(&self) -> bool {
        self.has_valid_face == self.constituents_valid()
    }

    fn constituents_valid(&self) -> bool {
        self.bounds_state == BoundsState::Appropriate
            && self.acceptable_roll
            && self.acceptable_pitch
            && self.acceptable_yaw
            && self.acceptable_quality
    }

    pub(crate) fn set_detection_state(&mut self, state: DetectionState) {
        self.detection_state = state;
    }

    pub(crate) fn apply_geometry(&mut self, verdict: GeometryVerdict) {
        self.bounds_state = verdict.bounds_state;
        self.acceptable_roll = verdict.acceptable_roll;
        self.acceptable_pitch = verdict.acceptable_pitch;
        self.acceptable_yaw = verdict.acceptable_yaw;
    }

    pub(crate) fn apply_quality(&mut self, verdict: QualityVerdict) {
        self.acceptable_quality = verdict.acceptable_quality;
        self.timer_on = verdict.acceptable_quality;
    }

    pub(crate) fn recompute(&mut self) {
        self.has_valid_face = self.constituents_valid();
    }
}
