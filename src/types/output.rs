//! Output structures for terminal display and the API

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{CaptureEffect, GuidanceCode, ValiditySnapshot};

/// Published after every dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Dispatch number (0 before the first dispatch)
    pub dispatch: u64,
    /// Fully recomputed validity state
    pub snapshot: ValiditySnapshot,
    /// Instruction for the user
    pub guidance: GuidanceCode,
    /// Side effect of this dispatch
    pub effect: CaptureEffect,
    /// Share of observed time spent ready (0-100)
    pub ready_percentage: f64,
    pub debug_mode: bool,
    pub hide_background: bool,
    /// Digest of the photo held for review
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_digest: Option<String>,
}

impl CaptureOutput {
    /// Shutter control should be enabled
    pub fn can_capture(&self) -> bool {
        self.snapshot.has_valid_face()
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} {} | bounds={} | ready={:.0}% | {}",
            self.guidance.emoji(),
            self.guidance.message(),
            self.snapshot.bounds_state(),
            self.ready_percentage,
            self.guidance.code(),
        );
        line.color(self.guidance.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "guidance={} | valid={} | bounds={} | roll={} | pitch={} | yaw={} | quality={} | effect={:?} | ready={:.1}%",
            self.guidance.code(),
            self.snapshot.has_valid_face(),
            self.snapshot.bounds_state(),
            self.snapshot.acceptable_roll(),
            self.snapshot.acceptable_pitch(),
            self.snapshot.acceptable_yaw(),
            self.snapshot.acceptable_quality(),
            self.effect,
            self.ready_percentage,
        )
    }
}
