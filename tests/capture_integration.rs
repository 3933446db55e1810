//! Integration tests for the capture path
//!
//! Tests the full path: action → CaptureStateMachine → evaluator → guidance → output

use passcam::core::{evaluate_geometry, evaluate_quality, CaptureConfig, CaptureStateMachine, Thresholds};
use passcam::types::{
    Action, BoundsState, CaptureEffect, CaptureOutput, CapturedPhoto, Geometry, GuidanceCode,
    Observation, Quality, Rect,
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

fn geometry(width: f64, roll: f64, pitch: f64, yaw: f64) -> Geometry {
    Geometry {
        bounding_box: Rect::new(0.0, 0.0, width, width * 1.2),
        roll,
        pitch,
        yaw,
    }
}

/// Geometry then quality reaches Ready
#[test]
fn test_ready_scenario() {
    let mut machine = CaptureStateMachine::new();

    machine.dispatch(Action::GeometryObserved(geometry(300.0, 1.4, 0.05, 0.05)));
    let output = machine.dispatch(Action::QualityObserved(Quality { score: 0.8 }));

    assert!(output.snapshot.has_valid_face());
    assert_eq!(output.guidance, GuidanceCode::Ready);
    assert!(output.can_capture());
}

/// Capture is gated on validity
#[test]
fn test_capture_gate_end_to_end() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut machine = CaptureStateMachine::new().with_shutter(tx);

    // Not ready yet
    let output = machine.dispatch(Action::RequestCapture);
    assert_eq!(output.effect, CaptureEffect::CaptureRejected);
    assert!(rx.try_recv().is_err());
    assert!(output.photo_digest.is_none());

    machine.dispatch(Action::GeometryObserved(geometry(300.0, 1.4, 0.0, 0.0)));
    machine.dispatch(Action::QualityObserved(Quality { score: 0.6 }));
    let output = machine.dispatch(Action::RequestCapture);
    assert_eq!(output.effect, CaptureEffect::ShutterReleased);
    assert!(rx.try_recv().is_ok());

    // Photo-acquisition side answers
    let photo = CapturedPhoto::new(b"jpeg bytes".to_vec());
    let digest = photo.digest.clone();
    let output = machine.dispatch(Action::PhotoCaptured(photo));
    assert_eq!(output.photo_digest, Some(digest));
    assert_eq!(output.guidance, GuidanceCode::Ready);
}

/// Guidance walks through the user's corrections
#[test]
fn test_guidance_progression() {
    let mut machine = CaptureStateMachine::new();
    assert_eq!(machine.guidance(), GuidanceCode::LookAtCamera);

    let steps = vec![
        (Action::QualityObserved(Quality { score: 0.05 }), GuidanceCode::LookStraight),
        (Action::GeometryObserved(geometry(120.0, 1.4, 0.0, 0.0)), GuidanceCode::MoveCloser),
        (Action::GeometryObserved(geometry(300.0, 0.3, 0.0, 0.0)), GuidanceCode::LookStraight),
        (Action::GeometryObserved(geometry(300.0, 1.4, 0.0, 0.0)), GuidanceCode::QualityTooLow),
        (Action::QualityObserved(Quality { score: 0.7 }), GuidanceCode::Ready),
        (Action::DetectionFailed { reason: "vision request failed".into() }, GuidanceCode::UnexpectedError),
        (Action::NoFaceObserved, GuidanceCode::LookAtCamera),
    ];

    for (action, expected) in steps {
        let name = action.name();
        let output = machine.dispatch(action);
        assert_eq!(output.guidance, expected, "after {}", name);
        assert!(output.snapshot.is_consistent(), "after {}", name);
    }
}

/// NoFace always clears validity, whatever came before
#[test]
fn test_no_face_resets_from_any_state() {
    let priors = vec![
        vec![],
        vec![Action::GeometryObserved(geometry(300.0, 1.4, 0.0, 0.0))],
        vec![
            Action::GeometryObserved(geometry(300.0, 1.4, 0.0, 0.0)),
            Action::QualityObserved(Quality { score: 0.9 }),
        ],
        vec![Action::DetectionFailed { reason: "e".into() }],
    ];

    for prior in priors {
        let mut machine = CaptureStateMachine::new();
        for action in prior {
            machine.dispatch(action);
        }
        let output = machine.dispatch(Action::NoFaceObserved);
        assert!(!output.snapshot.has_valid_face());
        assert_eq!(output.snapshot.bounds_state(), BoundsState::Unknown);
    }
}

/// Boundary values from the acceptance bands
#[test]
fn test_threshold_boundaries() {
    let t = Thresholds::default();

    let verdict = evaluate_geometry(&Observation::Found(geometry(167.0, 1.5, 0.0, 0.0)), &t);
    assert_eq!(verdict.bounds_state, BoundsState::Appropriate);
    assert!(verdict.acceptable_roll);

    let verdict = evaluate_geometry(&Observation::Found(geometry(166.0, 1.1, 0.0, 0.0)), &t);
    assert_eq!(verdict.bounds_state, BoundsState::TooSmall);
    assert!(!verdict.acceptable_roll);

    let verdict = evaluate_geometry(&Observation::Found(geometry(300.0, 1.6, 0.0, 0.0)), &t);
    assert!(!verdict.acceptable_roll);

    assert!(!evaluate_quality(&Observation::Found(Quality { score: 0.1 }), &t).acceptable_quality);
    assert!(evaluate_quality(&Observation::Found(Quality { score: 0.5 }), &t).acceptable_quality);
    assert!(!evaluate_quality(&Observation::NotFound, &t).acceptable_quality);
}

/// Config thresholds flow through to the machine
#[test]
fn test_config_thresholds_used_by_machine() {
    let config = CaptureConfig::from_json(r#"{"thresholds": {"quality_min": 0.95}}"#).unwrap();
    let mut machine = CaptureStateMachine::with_config(config);

    machine.dispatch(Action::GeometryObserved(geometry(300.0, 1.4, 0.0, 0.0)));
    let output = machine.dispatch(Action::QualityObserved(Quality { score: 0.8 }));
    assert_eq!(output.guidance, GuidanceCode::QualityTooLow);
}

/// Actions parsed from an action log drive the machine
#[test]
fn test_json_action_log() {
    let log = r#"
{"action":"window_resized","x":0,"y":0,"width":390,"height":844}
{"action":"geometry_observed","bounding_box":{"x":45,"y":200,"width":300,"height":380},"roll":1.45,"pitch":0.02,"yaw":-0.03}
{"action":"quality_observed","score":0.74}
{"action":"request_capture"}
"#;
    let mut machine = CaptureStateMachine::new();
    let mut last = None;
    for line in log.lines().filter(|l| !l.trim().is_empty()) {
        let action: Action = serde_json::from_str(line).unwrap();
        last = Some(machine.dispatch(action));
    }

    let output = last.unwrap();
    assert_eq!(output.effect, CaptureEffect::ShutterReleased);
    assert_eq!(machine.guide_frame(), Rect::new(95.0, 272.0, 200.0, 300.0));
}

/// JSON output is valid
#[test]
fn test_json_output_valid() {
    let mut machine = CaptureStateMachine::new();
    let output = machine.dispatch(Action::NoFaceObserved);

    let json = serde_json::to_string(&output).unwrap();
    assert!(json.contains("\"guidance\":\"LOOK_AT_CAMERA\""));
    assert!(json.contains("\"has_valid_face\":false"));
    assert!(!json.contains("photo_digest"));

    let back: CaptureOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.guidance, GuidanceCode::LookAtCamera);
}

/// Parseable output format
#[test]
fn test_parseable_output_format() {
    let mut machine = CaptureStateMachine::new();
    let output = machine.dispatch(Action::GeometryObserved(geometry(120.0, 1.4, 0.0, 0.0)));

    let formatted = output.to_parseable_string();
    assert!(formatted.contains("guidance=G020_MOVE_CLOSER"));
    assert!(formatted.contains("valid=false"));
    assert!(formatted.contains("bounds=TOO_SMALL"));
    assert!(formatted.contains("effect=None"));
}
