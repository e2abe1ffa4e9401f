//! Accumulated alignment and the rigid operators that produce it.
//!
//! | Operator | Effect on each measured section `s` |
//! |----------|-------------------------------------|
//! | `Shift { X, v }` | `x += v` |
//! | `Shift { Y, v }` | `y += v` |
//! | `RotateC(deg)` | rotate about the origin with the accumulated shift removed |
//! | `RotateA(deg)` | `y += s * pitch * tan(deg)` |
//! | `RotateB(deg)` | `x += s * pitch * tan(deg)` |
//!
//! Every operator has an exact inverse ([`AlignmentOp::inverse`]).

use serde::{Deserialize, Serialize};

use super::types::Axis;
use crate::core::{Profile, SidePair};

/// Accumulated corrections applied to a measured profile pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentState {
    /// X translation (mm)
    pub dx: f64,
    /// Y translation (mm)
    pub dy: f64,
    /// Tilt about the chord axis (degrees)
    pub a_deg: f64,
    /// Tilt about the thickness axis (degrees)
    pub b_deg: f64,
    /// In-plane rotation (degrees)
    pub c_deg: f64,
}

impl AlignmentState {
    /// Record an applied operator
    pub fn record(&mut self, op: AlignmentOp) {
        match op {
            AlignmentOp::Shift { axis: Axis::X, value } => self.dx += value,
            AlignmentOp::Shift { axis: Axis::Y, value } => self.dy += value,
            AlignmentOp::RotateA(deg) => self.a_deg += deg,
            AlignmentOp::RotateB(deg) => self.b_deg += deg,
            AlignmentOp::RotateC(deg) => self.c_deg += deg,
        }
    }

    /// True when no correction has been applied
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// A single rigid alignment operator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AlignmentOp {
    /// Translate along an axis
    Shift {
        /// Axis
        axis: Axis,
        /// Distance (mm)
        value: f64,
    },
    /// Tilt the section stack in y
    RotateA(f64),
    /// Tilt the section stack in x
    RotateB(f64),
    /// Rotate in the section plane
    RotateC(f64),
}

impl AlignmentOp {
    /// Operator that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            AlignmentOp::Shift { axis, value } => AlignmentOp::Shift {
                axis,
                value: -value,
            },
            AlignmentOp::RotateA(deg) => AlignmentOp::RotateA(-deg),
            AlignmentOp::RotateB(deg) => AlignmentOp::RotateB(-deg),
            AlignmentOp::RotateC(deg) => AlignmentOp::RotateC(-deg),
        }
    }

    /// Apply to one profile.
    ///
    /// `state` is the alignment before this operator; `RotateC` pivots
    /// around the origin of the unshifted measurement.
    pub fn apply(&self, profile: &Profile, state: &AlignmentState, pitch: f64) -> Profile {
        match *self {
            AlignmentOp::Shift { axis: Axis::X, value } => profile.translated(value, 0.0),
            AlignmentOp::Shift { axis: Axis::Y, value } => profile.translated(0.0, value),
            AlignmentOp::RotateC(deg) => profile
                .translated(-state.dx, -state.dy)
                .rotated(deg)
                .translated(state.dx, state.dy),
            AlignmentOp::RotateA(deg) => tilt(profile, Axis::Y, deg, pitch),
            AlignmentOp::RotateB(deg) => tilt(profile, Axis::X, deg, pitch),
        }
    }

    /// Apply to both sides of a measured pair
    pub fn apply_pair(
        &self,
        pair: &SidePair<Profile>,
        state: &AlignmentState,
        pitch: f64,
    ) -> SidePair<Profile> {
        SidePair::new(
            self.apply(&pair.convex, state, pitch),
            self.apply(&pair.concave, state, pitch),
        )
    }
}

/// Offset every section along `axis` in proportion to its spanwise position.
pub fn tilt(profile: &Profile, axis: Axis, angle_deg: f64, pitch: f64) -> Profile {
    let slope = angle_deg.to_radians().tan();
    profile.map_sections(|section, curve| {
        let offset = section as f64 * pitch * slope;
        match axis {
            Axis::X => curve.translated(offset, 0.0),
            Axis::Y => curve.translated(0.0, offset),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SectionCurve, Side};
    use approx::assert_relative_eq;

    fn profile() -> Profile {
        let c = SectionCurve::new(vec![-1.0, 0.0, 1.5], vec![0.2, 0.4, 0.1]).unwrap();
        Profile::from_sections(Side::Convex, [(100, c.clone()), (200, c)])
    }

    fn assert_profiles_close(a: &Profile, b: &Profile) {
        for ((sa, ca), (sb, cb)) in a.sections().zip(b.sections()) {
            assert_eq!(sa, sb);
            for (pa, pb) in ca.iter().zip(cb.iter()) {
                assert_relative_eq!(pa.x, pb.x, epsilon = 1e-12);
                assert_relative_eq!(pa.y, pb.y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_tilt_scales_with_section() {
        let tilted = tilt(&profile(), Axis::Y, 45.0, 0.1);
        assert_relative_eq!(tilted.section(100).unwrap().ys()[0], 0.2 + 10.0, epsilon = 1e-9);
        assert_relative_eq!(tilted.section(200).unwrap().ys()[0], 0.2 + 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_every_op_has_an_inverse() {
        let p = profile();
        let state = AlignmentState {
            dx: 0.3,
            dy: -0.2,
            ..Default::default()
        };
        let ops = [
            AlignmentOp::Shift {
                axis: Axis::X,
                value: 0.07,
            },
            AlignmentOp::Shift {
                axis: Axis::Y,
                value: -0.03,
            },
            AlignmentOp::RotateA(0.5),
            AlignmentOp::RotateB(-0.25),
            AlignmentOp::RotateC(1.5),
        ];
        for op in ops {
            let moved = op.apply(&p, &state, 0.1);
            let back = op.inverse().apply(&moved, &state, 0.1);
            assert_profiles_close(&back, &p);
        }
    }

    #[test]
    fn test_record() {
        let mut s = AlignmentState::default();
        assert!(s.is_identity());
        s.record(AlignmentOp::Shift {
            axis: Axis::X,
            value: 0.05,
        });
        s.record(AlignmentOp::RotateC(2.0));
        s.record(AlignmentOp::RotateC(-0.5));
        assert_relative_eq!(s.dx, 0.05);
        assert_relative_eq!(s.c_deg, 1.5);
        assert!(!s.is_identity());
    }
}
