//! Core modules for Passcam

pub mod api;
pub mod capture;
pub mod config;
pub mod evaluator;
pub mod guidance;
pub mod readiness;

pub use api::{create_router, run_server};
pub use capture::CaptureStateMachine;
pub use config::{CaptureConfig, Thresholds};
pub use evaluator::{evaluate_geometry, evaluate_quality};
pub use guidance::{debug_report, resolve};
pub use readiness::ReadinessTracker;
