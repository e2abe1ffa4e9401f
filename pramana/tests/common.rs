//! Test utilities for Pramana integration tests.
//!
//! Synthetic blades: every section carries a parabolic convex and concave
//! curve over `x in [-3, 3]`. Templates store both curves leading edge first;
//! scans store the concave curve trailing edge first, as the scanner does.

#![allow(dead_code)]

use std::ops::Range;

use pramana::{Point2D, PramanaConfig, Profile, SectionCurve, Side, SidePair};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sections present in every synthetic profile.
pub const SECTIONS: Range<usize> = 8..21;

/// Points per section curve.
pub const POINTS: usize = 121;

/// Compact configuration matching [`SECTIONS`].
pub fn test_config() -> PramanaConfig {
    PramanaConfig::from_yaml(
        r#"
stock:
  area_sections: [10, 19]
special:
  sections: [10, 19]
profile:
  control_sections: [11, 14, 17]
  c2:
    alpha: [13.0, 13.0, 13.0]
    gamma2: [0.0, 0.0, 0.0]
    b2: [0.0, 0.0, 0.0]
    nominal: [0.5, 0.5, 0.5]
    y2: [1.85, 1.85, 1.85]
    r2: [0.15, 0.15, 0.15]
"#,
    )
    .expect("test config is valid")
}

/// Nominal surface height at `x` of `section`.
pub fn surface(side: Side, section: usize, x: f64) -> f64 {
    // Slight spanwise growth so sections differ
    let t = 1.0 + section as f64 * 0.002;
    match side {
        Side::Convex => t - 0.05 * x * x,
        Side::Concave => -t + 0.02 * x * x,
    }
}

fn curve(side: Side, section: usize, dx: f64, dy: f64) -> SectionCurve {
    SectionCurve::from_points((0..POINTS).map(|i| {
        let x = -3.0 + i as f64 * 0.05;
        Point2D::new(x + dx, surface(side, section, x) + dy)
    }))
}

fn profile(side: Side, dx: f64, dy: f64) -> Profile {
    Profile::from_sections(side, SECTIONS.map(|s| (s, curve(side, s, dx, dy))))
}

/// Template pair.
pub fn template() -> SidePair<Profile> {
    SidePair::new(profile(Side::Convex, 0.0, 0.0), profile(Side::Concave, 0.0, 0.0))
}

/// Scan of the template moved rigidly by `(dx, dy)`.
pub fn shifted_scan(dx: f64, dy: f64) -> SidePair<Profile> {
    scan(profile(Side::Convex, dx, dy), profile(Side::Concave, dx, dy))
}

/// Scan with material added outward: `convex` above, `concave` below.
pub fn thick_scan(convex: f64, concave: f64) -> SidePair<Profile> {
    scan(
        profile(Side::Convex, 0.0, convex),
        profile(Side::Concave, 0.0, -concave),
    )
}

fn scan(convex: Profile, concave: Profile) -> SidePair<Profile> {
    SidePair::new(convex, concave.map_sections(|_, c| c.reversed()))
}

/// Add uniform noise in `[-amplitude, amplitude]` to every y.
pub fn with_noise(pair: &SidePair<Profile>, amplitude: f64, seed: u64) -> SidePair<Profile> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut noisy = |profile: &Profile| {
        profile.map_sections(|_, c| {
            SectionCurve::from_points(
                c.iter()
                    .map(|p| Point2D::new(p.x, p.y + rng.gen_range(-amplitude..=amplitude))),
            )
        })
    };
    SidePair::new(noisy(&pair.convex), noisy(&pair.concave))
}

/// Assert two profiles hold the same points within `tol`.
pub fn assert_profiles_close(a: &Profile, b: &Profile, tol: f64) {
    assert_eq!(a.section_indices(), b.section_indices());
    for (s, ca) in a.sections() {
        let cb = b.section(s).unwrap();
        assert_eq!(ca.len(), cb.len(), "section {s} length");
        for (p, q) in ca.iter().zip(cb.iter()) {
            assert!(
                p.distance(&q) < tol,
                "section {s}: {p:?} vs {q:?} exceeds tolerance {tol}"
            );
        }
    }
}
