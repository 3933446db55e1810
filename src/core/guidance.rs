//! Guidance resolver and debug overlay

use crate::types::{
    BoundsState, DebugLine, DetectionState, DimensionStatus, Geometry, GuidanceCode, Observation,
    Quality, ValiditySnapshot,
};

/// Map a snapshot to a single instruction. First match wins.
pub fn resolve(snapshot: &ValiditySnapshot) -> GuidanceCode {
    match snapshot.detection_state() {
        DetectionState::DetectionErrored => return GuidanceCode::UnexpectedError,
        DetectionState::NoFace => return GuidanceCode::LookAtCamera,
        DetectionState::FaceDetected => {}
    }

    if snapshot.has_valid_face() {
        return GuidanceCode::Ready;
    }

    match snapshot.bounds_state() {
        BoundsState::TooSmall => GuidanceCode::MoveCloser,
        BoundsState::TooLarge => GuidanceCode::MoveFurther,
        BoundsState::OffCentre => GuidanceCode::Centre,
        BoundsState::Unknown | BoundsState::Appropriate => {
            if !snapshot.acceptable_pose() {
                GuidanceCode::LookStraight
            } else if !snapshot.acceptable_quality() {
                GuidanceCode::QualityTooLow
            } else {
                GuidanceCode::Unavailable
            }
        }
    }
}

/// Lines for the debug overlay: raw pose and quality values with pass/fail.
///
/// A section whose observation is missing contributes nothing; an errored
/// one contributes a single `ERROR:` line.
pub fn debug_report(
    snapshot: &ValiditySnapshot,
    geometry: &Observation<Geometry>,
    quality: &Observation<Quality>,
) -> Vec<DebugLine> {
    let mut lines = Vec::new();

    match geometry {
        Observation::NotFound => {}
        Observation::Errored(reason) => lines.push(error_line(reason)),
        Observation::Found(g) => {
            lines.push(DebugLine {
                label: format!("R: {:.4}", g.roll),
                status: DimensionStatus::from_check(snapshot.acceptable_roll()),
            });
            lines.push(DebugLine {
                label: format!("P: {:.4}", g.pitch),
                status: DimensionStatus::from_check(snapshot.acceptable_pitch()),
            });
            lines.push(DebugLine {
                label: format!("Y: {:.4}", g.yaw),
                status: DimensionStatus::from_check(snapshot.acceptable_yaw()),
            });
        }
    }

    match quality {
        Observation::NotFound => {}
        Observation::Errored(reason) => lines.push(error_line(reason)),
        Observation::Found(q) => lines.push(DebugLine {
            label: format!("Q: {:.4}", q.score),
            status: DimensionStatus::from_check(snapshot.acceptable_quality()),
        }),
    }

    lines
}

fn error_line(reason: &str) -> DebugLine {
    DebugLine {
        label: format!("ERROR: {}", reason),
        status: DimensionStatus::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeometryVerdict, QualityVerdict, Rect};

    fn face_snapshot(geometry: GeometryVerdict, quality: bool) -> ValiditySnapshot {
        let mut snapshot = ValiditySnapshot::new();
        snapshot.set_detection_state(DetectionState::FaceDetected);
        snapshot.apply_geometry(geometry);
        snapshot.apply_quality(QualityVerdict { acceptable_quality: quality });
        snapshot.recompute();
        snapshot
    }

    fn good_geometry() -> GeometryVerdict {
        GeometryVerdict {
            bounds_state: BoundsState::Appropriate,
            acceptable_roll: true,
            acceptable_pitch: true,
            acceptable_yaw: true,
        }
    }

    #[test]
    fn test_detection_state_takes_precedence() {
        let mut snapshot = face_snapshot(good_geometry(), true);
        assert_eq!(resolve(&snapshot), GuidanceCode::Ready);

        snapshot.set_detection_state(DetectionState::DetectionErrored);
        assert_eq!(resolve(&snapshot), GuidanceCode::UnexpectedError);

        snapshot.set_detection_state(DetectionState::NoFace);
        assert_eq!(resolve(&snapshot), GuidanceCode::LookAtCamera);
    }

    #[test]
    fn test_bounds_before_pose_before_quality() {
        let bad_everything = GeometryVerdict {
            bounds_state: BoundsState::TooSmall,
            acceptable_roll: false,
            acceptable_pitch: false,
            acceptable_yaw: false,
        };
        assert_eq!(resolve(&face_snapshot(bad_everything, false)), GuidanceCode::MoveCloser);

        let too_large = GeometryVerdict { bounds_state: BoundsState::TooLarge, ..bad_everything };
        assert_eq!(resolve(&face_snapshot(too_large, false)), GuidanceCode::MoveFurther);

        let off_centre = GeometryVerdict { bounds_state: BoundsState::OffCentre, ..bad_everything };
        assert_eq!(resolve(&face_snapshot(off_centre, false)), GuidanceCode::Centre);

        let tilted = GeometryVerdict { acceptable_yaw: false, ..good_geometry() };
        assert_eq!(resolve(&face_snapshot(tilted, false)), GuidanceCode::LookStraight);

        assert_eq!(resolve(&face_snapshot(good_geometry(), false)), GuidanceCode::QualityTooLow);
    }

    #[test]
    fn test_unknown_bounds_with_good_checks_is_unavailable() {
        let unknown = GeometryVerdict { bounds_state: BoundsState::Unknown, ..good_geometry() };
        assert_eq!(resolve(&face_snapshot(unknown, true)), GuidanceCode::Unavailable);
    }

    #[test]
    fn test_debug_report_sections() {
        let snapshot = face_snapshot(GeometryVerdict { acceptable_pitch: false, ..good_geometry() }, true);
        let geometry = Observation::Found(Geometry {
            bounding_box: Rect::new(0.0, 0.0, 300.0, 360.0),
            roll: 1.4,
            pitch: 0.3,
            yaw: 0.0,
        });
        let quality = Observation::Errored("quality request failed".to_string());

        let lines = debug_report(&snapshot, &geometry, &quality);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].label, "R: 1.4000");
        assert_eq!(lines[0].status, DimensionStatus::Passing);
        assert_eq!(lines[1].status, DimensionStatus::Failing);
        assert_eq!(lines[3].label, "ERROR: quality request failed");
        assert_eq!(lines[3].status, DimensionStatus::Neutral);

        assert!(debug_report(&snapshot, &Observation::NotFound, &Observation::NotFound).is_empty());
    }
}
