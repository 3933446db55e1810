//! Guidance codes shown to the person in front of the camera
//! Same code/description split as the rest of the status taxonomy

use colored::Color;
use serde::{Deserialize, Serialize};

/// Discrete user instruction derived from a validity snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuidanceCode {
    // =========================================================================
    // G00x: Capture possible
    // =========================================================================
    /// Every check passes, shutter enabled
    Ready,

    // =========================================================================
    // G01x: Detection
    // =========================================================================
    /// No face in frame
    LookAtCamera,
    /// Vision pipeline failed on the last frame
    UnexpectedError,

    // =========================================================================
    // G02x: Framing
    // =========================================================================
    MoveCloser,
    MoveFurther,
    Centre,

    // =========================================================================
    // G03x: Pose and quality
    // =========================================================================
    LookStraight,
    QualityTooLow,

    // =========================================================================
    // G09x: Fallback
    // =========================================================================
    /// Face detected but no specific check explains the failure
    Unavailable,
}

impl GuidanceCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ready => "G001_READY",
            Self::LookAtCamera => "G010_LOOK_AT_CAMERA",
            Self::UnexpectedError => "G011_UNEXPECTED_ERROR",
            Self::MoveCloser => "G020_MOVE_CLOSER",
            Self::MoveFurther => "G021_MOVE_FURTHER",
            Self::Centre => "G022_CENTRE",
            Self::LookStraight => "G030_LOOK_STRAIGHT",
            Self::QualityTooLow => "G031_QUALITY_TOO_LOW",
            Self::Unavailable => "G090_UNAVAILABLE",
        }
    }

    /// Prompt shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::Ready => "OK. Hold still and take your photo",
            Self::LookAtCamera => "Please look at the camera",
            Self::UnexpectedError => "An unexpected error occurred",
            Self::MoveCloser => "Please bring your face closer to the camera",
            Self::MoveFurther => "Please hold the camera further from your face",
            Self::Centre => "Please move your face to the centre of the frame",
            Self::LookStraight => "Please look straight at the camera",
            Self::QualityTooLow => "Image quality too low",
            Self::Unavailable => "We cannot take your photo right now",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Ready => Color::Green,
            Self::LookAtCamera => Color::BrightBlack,
            Self::UnexpectedError => Color::Red,
            Self::MoveCloser | Self::MoveFurther | Self::Centre => Color::Yellow,
            Self::LookStraight | Self::QualityTooLow => Color::Yellow,
            Self::Unavailable => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Ready => "📸",
            Self::LookAtCamera => "👀",
            Self::UnexpectedError => "⚠",
            Self::MoveCloser => "🔍",
            Self::MoveFurther => "↔",
            Self::Centre => "🎯",
            Self::LookStraight => "🙂",
            Self::QualityTooLow => "🌫",
            Self::Unavailable => "⛔",
        }
    }
}

impl std::fmt::Display for GuidanceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Pass/fail marker for one line of the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionStatus {
    Neutral,
    Passing,
    Failing,
}

impl DimensionStatus {
    pub fn from_check(passing: bool) -> Self {
        if passing {
            Self::Passing
        } else {
            Self::Failing
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Neutral => Color::White,
            Self::Passing => Color::Green,
            Self::Failing => Color::Red,
        }
    }
}

/// One line of the debug overlay, e.g. `R: 1.4000`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLine {
    pub label: String,
    pub status: DimensionStatus,
}
