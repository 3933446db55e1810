//! Capture state machine
//!
//! Every dispatch runs: apply input → evaluator pass(es) → recompute
//! `has_valid_face` once → publish output. Nothing outside `dispatch`
//! can observe the flags between those steps.

use std::time::Instant;
use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use crate::core::config::CaptureConfig;
use crate::core::evaluator::{evaluate_geometry, evaluate_quality};
use crate::core::guidance::{debug_report, resolve};
use crate::core::readiness::ReadinessTracker;
use crate::types::{
    Action, CaptureEffect, CaptureOutput, CapturedPhoto, DebugLine, DetectionState, Geometry,
    GuidanceCode, Observation, Quality, Rect, ShutterReleased, ValiditySnapshot,
};

/// Owns the validity snapshot. `&mut self` on `dispatch` is the
/// single-writer guarantee; shared owners must wrap it in a lock.
#[derive(Debug)]
pub struct CaptureStateMachine {
    config: CaptureConfig,
    snapshot: ValiditySnapshot,
    geometry: Observation<Geometry>,
    quality: Observation<Quality>,
    /// Face layout guide, recentred on window resize
    guide_frame: Rect,
    debug_mode: bool,
    hide_background: bool,
    captured_photo: Option<CapturedPhoto>,
    readiness: ReadinessTracker,
    shutter: Option<UnboundedSender<ShutterReleased>>,
    dispatch_count: u64,
}

impl Default for CaptureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStateMachine {
    /// Create with default thresholds
    pub fn new() -> Self {
        Self::with_config(CaptureConfig::default())
    }

    pub fn with_config(config: CaptureConfig) -> Self {
        Self {
            config,
            snapshot: ValiditySnapshot::new(),
            geometry: Observation::NotFound,
            quality: Observation::NotFound,
            guide_frame: Rect::new(0.0, 0.0, config.guide_width, config.guide_height),
            debug_mode: config.debug_mode,
            hide_background: false,
            captured_photo: None,
            readiness: ReadinessTracker::new(),
            shutter: None,
            dispatch_count: 0,
        }
    }

    /// Forward shutter releases to the photo-acquisition side
    pub fn with_shutter(mut self, shutter: UnboundedSender<ShutterReleased>) -> Self {
        self.shutter = Some(shutter);
        self
    }

    /// Apply one action and return the recomputed state
    pub fn dispatch(&mut self, action: Action) -> CaptureOutput {
        self.dispatch_count += 1;
        let name = action.name();

        let effect = match action {
            Action::WindowResized(window) => {
                self.guide_frame = self.guide_frame.centred_in(&window);
                CaptureEffect::None
            }
            Action::NoFaceObserved => {
                self.snapshot.set_detection_state(DetectionState::NoFace);
                self.set_geometry(Observation::NotFound);
                self.set_quality(Observation::NotFound);
                CaptureEffect::None
            }
            Action::GeometryObserved(geometry) => {
                self.snapshot.set_detection_state(DetectionState::FaceDetected);
                self.set_geometry(Observation::Found(geometry));
                CaptureEffect::None
            }
            Action::QualityObserved(quality) => {
                self.snapshot.set_detection_state(DetectionState::FaceDetected);
                self.set_quality(Observation::Found(quality));
                CaptureEffect::None
            }
            Action::DetectionFailed { reason } => {
                warn!(%reason, "face detection failed");
                self.snapshot.set_detection_state(DetectionState::DetectionErrored);
                self.set_geometry(Observation::Errored(reason.clone()));
                self.set_quality(Observation::Errored(reason));
                CaptureEffect::None
            }
            Action::ToggleDebugMode => {
                self.debug_mode = !self.debug_mode;
                CaptureEffect::None
            }
            Action::ToggleHideBackground => {
                self.hide_background = !self.hide_background;
                CaptureEffect::None
            }
            Action::RequestCapture => self.request_capture(),
            Action::PhotoCaptured(photo) => {
                info!(digest = photo.short_digest(), bytes = photo.len(), "photo stored for review");
                self.captured_photo = Some(photo);
                CaptureEffect::PhotoStored
            }
        };

        self.snapshot.recompute();
        self.readiness.observe(Instant::now(), self.snapshot.has_valid_face());

        let output = self.output(effect);
        debug!(
            dispatch = self.dispatch_count,
            action = name,
            guidance = output.guidance.code(),
            valid = output.snapshot.has_valid_face(),
            "dispatched"
        );
        output
    }

    fn set_geometry(&mut self, observation: Observation<Geometry>) {
        let verdict = evaluate_geometry(&observation, &self.config.thresholds);
        self.geometry = observation;
        self.snapshot.apply_geometry(verdict);
    }

    fn set_quality(&mut self, observation: Observation<Quality>) {
        let verdict = evaluate_quality(&observation, &self.config.thresholds);
        self.quality = observation;
        self.snapshot.apply_quality(verdict);
    }

    fn request_capture(&mut self) -> CaptureEffect {
        if !self.snapshot.has_valid_face() {
            debug!(guidance = resolve(&self.snapshot).code(), "capture rejected, face not valid");
            return CaptureEffect::CaptureRejected;
        }

        info!(dispatch = self.dispatch_count, "shutter released");
        if let Some(shutter) = &self.shutter {
            let signal = ShutterReleased {
                at: Utc::now(),
                dispatch: self.dispatch_count,
            };
            if shutter.send(signal).is_err() {
                warn!("shutter receiver dropped, capture signal lost");
            }
        }
        CaptureEffect::ShutterReleased
    }

    fn output(&self, effect: CaptureEffect) -> CaptureOutput {
        CaptureOutput {
            timestamp: Utc::now(),
            dispatch: self.dispatch_count,
            snapshot: self.snapshot,
            guidance: resolve(&self.snapshot),
            effect,
            ready_percentage: self.readiness.percentage(),
            debug_mode: self.debug_mode,
            hide_background: self.hide_background,
            photo_digest: self.captured_photo.as_ref().map(|p| p.digest.clone()),
        }
    }

    /// Get current output without dispatching
    pub fn current_output(&self) -> CaptureOutput {
        self.output(CaptureEffect::None)
    }

    pub fn snapshot(&self) -> &ValiditySnapshot {
        &self.snapshot
    }

    pub fn guidance(&self) -> GuidanceCode {
        resolve(&self.snapshot)
    }

    pub fn has_valid_face(&self) -> bool {
        self.snapshot.has_valid_face()
    }

    pub fn geometry(&self) -> &Observation<Geometry> {
        &self.geometry
    }

    pub fn quality(&self) -> &Observation<Quality> {
        &self.quality
    }

    /// Debug overlay for the latest observations
    pub fn debug_lines(&self) -> Vec<DebugLine> {
        debug_report(&self.snapshot, &self.geometry, &self.quality)
    }

    pub fn guide_frame(&self) -> Rect {
        self.guide_frame
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn hide_background(&self) -> bool {
        self.hide_background
    }

    /// Photo held for thumbnail / review
    pub fn captured_photo(&self) -> Option<&CapturedPhoto> {
        self.captured_photo.as_ref()
    }

    /// Hand the photo over to the caller
    pub fn take_captured_photo(&mut self) -> Option<CapturedPhoto> {
        self.captured_photo.take()
    }

    pub fn readiness(&self) -> &ReadinessTracker {
        &self.readiness
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// Back to the initial state, keeping config and shutter
    pub fn reset(&mut self) {
        let shutter = self.shutter.take();
        *self = Self::with_config(self.config);
        self.shutter = shutter;
    }
}

// =============================================================================
// TESTS
// =============================================================================
