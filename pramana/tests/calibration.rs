//! Calibration fitting and measurement preparation end to end.

mod common;

use approx::assert_relative_eq;
use common::*;
use pramana::calibration::tilt_offsets;
use pramana::{
    Error, Point2D, PramanaConfig, Profile, ScanMetadata, SectionCurve, Side, SidePair, Workpiece,
    create_calibration_vectors,
};

const MASTER_SECTIONS: std::ops::Range<usize> = 140..310;

/// Master scan whose first points drift linearly along the span.
fn master(area: i32) -> SidePair<Profile> {
    let curve = |x0: f64, y0: f64| {
        SectionCurve::from_points((0..5).map(|i| Point2D::new(x0 + i as f64 * 0.5, y0)))
    };
    let convex = Profile::from_sections(
        Side::Convex,
        MASTER_SECTIONS.map(|s| (s, curve(-7.3 + 0.001 * s as f64, 5.2 - 0.0005 * s as f64))),
    )
    .with_scan(ScanMetadata::new("MASTER", area));
    let concave = Profile::from_sections(
        Side::Concave,
        MASTER_SECTIONS.map(|s| (s, curve(-7.6, -4.8 + 0.0002 * s as f64))),
    );
    SidePair::new(convex, concave)
}

#[test]
fn test_master_lands_on_targets_with_additional_calibration() {
    let config = PramanaConfig::default();
    let vectors = create_calibration_vectors(&master(101), &config.calibration_targets()).unwrap();
    assert_eq!(vectors.len(), MASTER_SECTIONS.end);

    let wp = Workpiece::from_raw(config.clone(), master(101), &master(101), &vectors).unwrap();
    let extra = config.additional_calibration();
    let pitch = config.profile.section_pitch;
    let zeros = vec![0.0; MASTER_SECTIONS.end];
    let tilt_x = tilt_offsets(&zeros, extra.convex.tilt_b, pitch);
    let tilt_y = tilt_offsets(&zeros, extra.convex.tilt_a, pitch);
    let concave_tilt_x = tilt_offsets(&zeros, extra.concave.tilt_b, pitch);

    for s in MASTER_SECTIONS {
        let convex = wp.measured().convex.section(s).unwrap().first().unwrap();
        assert_relative_eq!(convex.x, -7.5 + extra.convex.shift_x + tilt_x[s], epsilon = 1e-9);
        assert_relative_eq!(convex.y, 5.0 + extra.convex.shift_y + tilt_y[s], epsilon = 1e-9);

        let concave = wp.measured().concave.section(s).unwrap().first().unwrap();
        assert_relative_eq!(
            concave.x,
            -7.5 + extra.concave.shift_x + concave_tilt_x[s],
            epsilon = 1e-9
        );
        assert_relative_eq!(concave.y, -5.0 + extra.concave.shift_y, epsilon = 1e-9);
    }
}

#[test]
fn test_only_master_scans_calibrate() {
    let config = PramanaConfig::default();
    let err = create_calibration_vectors(&master(3), &config.calibration_targets()).unwrap_err();
    assert!(matches!(
        err,
        Error::WrongProfileKind {
            expected: 101,
            found: Some(3)
        }
    ));
}

#[test]
fn test_tip_scan_drops_high_convex_points() {
    let mut config = test_config();
    config.calibration.additional = pramana::AdditionalCalibration::none();
    let vectors = pramana::CalibrationVectors::zeros(SECTIONS.end);

    // Lift the middle of the convex side above the 3 mm filter
    let mut raw = shifted_scan(0.0, 2.2);
    raw.convex = raw.convex.with_scan(ScanMetadata::new("P7", 1));
    let wp = Workpiece::from_raw(config.clone(), template(), &raw, &vectors).unwrap();
    for (s, curve) in wp.measured().convex.sections() {
        assert!(!curve.is_empty());
        assert!(curve.len() < raw.convex.section(s).unwrap().len());
        assert!(curve.iter().all(|p| p.y <= 3.0));
    }

    // Other area codes keep every point
    raw.convex = raw.convex.with_scan(ScanMetadata::new("P7", 5));
    let wp = Workpiece::from_raw(config, template(), &raw, &vectors).unwrap();
    for (s, curve) in wp.measured().convex.sections() {
        assert_eq!(curve.len(), raw.convex.section(s).unwrap().len());
    }
}
