//! Per-frame signals from the vision pipeline

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Same size, centred on `other`
    pub fn centred_in(&self, other: &Rect) -> Rect {
        Rect {
            x: other.mid_x() - self.width / 2.0,
            y: other.mid_y() - self.height / 2.0,
            width: self.width,
            height: self.height,
        }
    }
}

/// Face geometry for one analysed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Detected face bounds
    pub bounding_box: Rect,
    /// Rotation around the view axis (radians)
    pub roll: f64,
    /// Nodding rotation (radians)
    pub pitch: f64,
    /// Head-turn rotation (radians)
    pub yaw: f64,
}

/// Capture quality for one analysed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    /// Nominally 0.0-1.0
    pub score: f64,
}

/// Tri-state result of reading a signal from a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Observation<T> {
    /// No face in the frame
    NotFound,
    /// Signal read successfully
    Found(T),
    /// Reading failed, with the collaborator's reason
    Errored(String),
}

impl<T> Observation<T> {
    pub fn is_errored(&self) -> bool {
        matches!(self, Observation::Errored(_))
    }
}

impl<T> Default for Observation<T> {
    fn default() -> Self {
        Observation::NotFound
    }
}
