//! Validity evaluator: observations → per-dimension verdicts
//!
//! Pure functions. An errored observation is logged and treated exactly
//! like a missing one.

use tracing::warn;
use crate::core::config::Thresholds;
use crate::types::{
    BoundsState, Geometry, GeometryVerdict, Observation, Quality, QualityVerdict, Rect,
};

/// Evaluate framing and pose
pub fn evaluate_geometry(observation: &Observation<Geometry>, thresholds: &Thresholds) -> GeometryVerdict {
    match observation {
        Observation::NotFound => GeometryVerdict::rejected(),
        Observation::Errored(reason) => {
            warn!(%reason, "face geometry observation errored");
            GeometryVerdict::rejected()
        }
        Observation::Found(geometry) => GeometryVerdict {
            bounds_state: classify_bounds(&geometry.bounding_box, thresholds),
            acceptable_roll: geometry.roll > thresholds.roll_min && geometry.roll < thresholds.roll_max,
            acceptable_pitch: geometry.pitch.abs() < thresholds.pitch_limit,
            acceptable_yaw: geometry.yaw.abs() < thresholds.yaw_limit,
        },
    }
}

/// Evaluate capture quality. One assignment per branch.
pub fn evaluate_quality(observation: &Observation<Quality>, thresholds: &Thresholds) -> QualityVerdict {
    match observation {
        Observation::NotFound => QualityVerdict::rejected(),
        Observation::Errored(reason) => {
            warn!(%reason, "face quality observation errored");
            QualityVerdict::rejected()
        }
        Observation::Found(quality) => QualityVerdict {
            acceptable_quality: quality.score >= thresholds.quality_min,
        },
    }
}

/// Size-only heuristic; never yields TooLarge or OffCentre.
fn classify_bounds(bounding_box: &Rect, thresholds: &Thresholds) -> BoundsState {
    // NaN width fails the `>=` and lands in TooSmall
    if bounding_box.width * thresholds.face_width_scale >= thresholds.min_scaled_face_width {
        BoundsState::Appropriate
    } else {
        BoundsState::TooSmall
    }
}

// =============================================================================
// TESTS
// =============================================================================
