//! Capture configuration
//!
//! Defaults come from the constants in the crate root. A JSON file may
//! override any subset of fields.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{
    PasscamError, Result,
    FACE_WIDTH_SCALE, GUIDE_HEIGHT, GUIDE_WIDTH, MIN_SCALED_FACE_WIDTH, PITCH_LIMIT,
    QUALITY_MIN, ROLL_MAX, ROLL_MIN, YAW_LIMIT,
};

/// Acceptance thresholds used by the validity evaluator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub face_width_scale: f64,
    pub min_scaled_face_width: f64,
    pub roll_min: f64,
    pub roll_max: f64,
    pub pitch_limit: f64,
    pub yaw_limit: f64,
    pub quality_min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            face_width_scale: FACE_WIDTH_SCALE,
            min_scaled_face_width: MIN_SCALED_FACE_WIDTH,
            roll_min: ROLL_MIN,
            roll_max: ROLL_MAX,
            pitch_limit: PITCH_LIMIT,
            yaw_limit: YAW_LIMIT,
            quality_min: QUALITY_MIN,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.face_width_scale,
            self.min_scaled_face_width,
            self.roll_min,
            self.roll_max,
            self.pitch_limit,
            self.yaw_limit,
            self.quality_min,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(PasscamError::Config("thresholds must be finite".to_string()));
        }
        if self.roll_min >= self.roll_max {
            return Err(PasscamError::Config(format!(
                "roll_min ({}) must be below roll_max ({})",
                self.roll_min, self.roll_max
            )));
        }
        if self.pitch_limit <= 0.0 || self.yaw_limit <= 0.0 {
            return Err(PasscamError::Config(
                "pitch_limit and yaw_limit must be positive".to_string(),
            ));
        }
        if self.face_width_scale <= 0.0 {
            return Err(PasscamError::Config("face_width_scale must be positive".to_string()));
        }
        Ok(())
    }
}

/// Everything a state machine needs at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub thresholds: Thresholds,
    /// Size of the face layout guide
    pub guide_width: f64,
    pub guide_height: f64,
    /// Initial debug overlay state
    pub debug_mode: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            guide_width: GUIDE_WIDTH,
            guide_height: GUIDE_HEIGHT,
            debug_mode: false,
        }
    }
}

impl CaptureConfig {
    /// Load from a JSON file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: CaptureConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if !(self.guide_width >= 0.0 && self.guide_height >= 0.0) {
            return Err(PasscamError::Config("guide size must be non-negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CaptureConfig::from_json(r#"{"thresholds": {"quality_min": 0.5}}"#).unwrap();

        assert_eq!(config.thresholds.quality_min, 0.5);
        assert_eq!(config.thresholds.roll_min, ROLL_MIN);
        assert_eq!(config.guide_width, GUIDE_WIDTH);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_inverted_roll_band_rejected() {
        let result = CaptureConfig::from_json(r#"{"thresholds": {"roll_min": 1.6, "roll_max": 1.2}}"#);
        assert!(matches!(result, Err(PasscamError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let result = CaptureConfig::from_json("{ nope");
        assert!(matches!(result, Err(PasscamError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CaptureConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(PasscamError::Io(_))));
    }
}
