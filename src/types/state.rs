//! Detection and framing state definitions

use serde::{Deserialize, Serialize};

/// Outcome of the latest face detection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionState {
    /// No face in the latest frame
    NoFace,
    /// A face was found and its signals are being evaluated
    FaceDetected,
    /// The vision pipeline failed on the latest frame
    DetectionErrored,
}

impl std::fmt::Display for DetectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DetectionState::NoFace => "NO_FACE",
            DetectionState::FaceDetected => "FACE_DETECTED",
            DetectionState::DetectionErrored => "DETECTION_ERRORED",
        };
        write!(f, "{}", name)
    }
}

/// Where the detected face sits relative to the framing guide.
///
/// `TooLarge` and `OffCentre` are part of the model but the current size
/// heuristic only yields `TooSmall` or `Appropriate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoundsState {
    Unknown,
    TooSmall,
    TooLarge,
    OffCentre,
    Appropriate,
}

impl std::fmt::Display for BoundsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoundsState::Unknown => "UNKNOWN",
            BoundsState::TooSmall => "TOO_SMALL",
            BoundsState::TooLarge => "TOO_LARGE",
            BoundsState::OffCentre => "OFF_CENTRE",
            BoundsState::Appropriate => "APPROPRIATE",
        };
        write!(f, "{}", name)
    }
}
