//! Passcam: capture engine for passport-style photos
//!
//! Vision signals → CaptureStateMachine → ValiditySnapshot + GuidanceCode

pub mod core;
pub mod error;
pub mod types;

pub use error::{PasscamError, Result};

// =============================================================================
// BOUNDS [C] - Face framing
// =============================================================================

/// Scale applied to the detected face width before the size check
pub const FACE_WIDTH_SCALE: f64 = 1.2;

/// Scaled face width below which the face counts as too small
pub const MIN_SCALED_FACE_WIDTH: f64 = 200.0;

// =============================================================================
// POSE [C] - Radians, bands are open intervals
// =============================================================================

/// Roll must lie strictly inside (ROLL_MIN, ROLL_MAX).
/// The band sits around the device's upright portrait orientation, not zero.
pub const ROLL_MIN: f64 = 1.2;
pub const ROLL_MAX: f64 = 1.6;

/// |pitch| must be below this
pub const PITCH_LIMIT: f64 = 0.2;

/// |yaw| must be below this
pub const YAW_LIMIT: f64 = 0.15;

// =============================================================================
// QUALITY [C]
// =============================================================================

/// Minimum capture quality score (inclusive)
pub const QUALITY_MIN: f64 = 0.2;

// =============================================================================
// LAYOUT GUIDE
// =============================================================================

/// Default size of the on-screen face layout guide (points)
pub const GUIDE_WIDTH: f64 = 200.0;
pub const GUIDE_HEIGHT: f64 = 300.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
