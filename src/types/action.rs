//! Actions accepted by the capture state machine
//!
//! Wire format is one JSON object tagged by `action`, e.g.
//! `{"action":"quality_observed","score":0.8}`.

use serde::{Deserialize, Serialize};
use crate::types::{CapturedPhoto, Geometry, Quality, Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // View setup
    WindowResized(Rect),

    // Vision collaborator, once per analysed frame
    NoFaceObserved,
    GeometryObserved(Geometry),
    QualityObserved(Quality),
    DetectionFailed { reason: String },

    // User
    ToggleDebugMode,
    ToggleHideBackground,
    RequestCapture,

    // Photo-acquisition collaborator
    PhotoCaptured(CapturedPhoto),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::WindowResized(_) => "window_resized",
            Action::NoFaceObserved => "no_face_observed",
            Action::GeometryObserved(_) => "geometry_observed",
            Action::QualityObserved(_) => "quality_observed",
            Action::DetectionFailed { .. } => "detection_failed",
            Action::ToggleDebugMode => "toggle_debug_mode",
            Action::ToggleHideBackground => "toggle_hide_background",
            Action::RequestCapture => "request_capture",
            Action::PhotoCaptured(_) => "photo_captured",
        }
    }
}

/// Side effect a dispatch produced, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureEffect {
    None,
    /// Capture requested while ready; photo acquisition signalled
    ShutterReleased,
    /// Capture requested while not ready; nothing happened
    CaptureRejected,
    /// A photo was stored for review
    PhotoStored,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_geometry_action_from_json() {
        let json = r#"{"action":"geometry_observed","bounding_box":{"x":10,"y":20,"width":300,"height":360},"roll":1.4,"pitch":0.05,"yaw":-0.02}"#;
        let action: Action = serde_json::from_str(json).unwrap();

        assert_eq!(
            action,
            Action::GeometryObserved(Geometry {
                bounding_box: Rect::new(10.0, 20.0, 300.0, 360.0),
                roll: 1.4,
                pitch: 0.05,
                yaw: -0.02,
            })
        );
    }

    #[test]
    fn test_unit_and_struct_actions_from_json() {
        let action: Action = serde_json::from_str(r#"{"action":"request_capture"}"#).unwrap();
        assert_eq!(action, Action::RequestCapture);

        let action: Action =
            serde_json::from_str(r#"{"action":"detection_failed","reason":"no frame"}"#).unwrap();
        assert_eq!(action.name(), "detection_failed");
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = serde_json::from_str::<Action>(r#"{"action":"self_destruct"}"#);
        assert!(result.is_err());
    }
}
