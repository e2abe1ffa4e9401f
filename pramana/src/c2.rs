//! C2 dimensional check near the trailing edge.
//!
//! For each control section a theoretical concave point is placed at a
//! polar offset from the trailing-edge anchor, and a theoretical convex
//! point at the nominal C2 distance from it:
//!
//! ```text
//!                  convex  ~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//!                                 tCv  <-- nominal, angle - 90
//!                                  |
//!                  concave ~~~~~~~tCc~~~~~~~~~~~~~~~~~~
//!                                   \  position, angle
//!                                    anchor (b2, -(y2 + r2))
//!
//!   angle = 90 - alpha + gamma2 + angle_offset
//! ```
//!
//! Each theoretical point is matched to the nearest measured point on its
//! side. C2 is the distance between the two matched points.

use serde::{Deserialize, Serialize};

use crate::core::{Point2D, Profile, SidePair, round_to};
use crate::error::{Error, Result};
use crate::geometry::closest_point;

/// Reported value for an undefined or implausible C2.
pub const C2_INVALID: f64 = 99.0;

/// Nominal geometry of one control section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct C2SectionNominal {
    /// Anchor x: distance from the X zero point to the trailing edge (mm)
    pub b2: f64,
    /// Trailing-edge y offset (mm)
    pub y2: f64,
    /// Trailing-edge radius (mm)
    pub r2: f64,
    /// Alpha angle (decimal degrees)
    pub alpha_deg: f64,
    /// Gamma2 angle (decimal degrees)
    pub gamma2_deg: f64,
    /// Nominal C2 (mm)
    pub nominal: f64,
}

/// C2 check parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct C2Params {
    /// One entry per control section, in control-section order
    pub sections: Vec<C2SectionNominal>,
    /// Distance from the anchor to the concave theoretical point (mm)
    pub position: f64,
    /// Constant added to the polar angle (degrees)
    pub angle_offset_deg: f64,
}

/// C2 result of one section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct C2Measurement {
    /// Section index
    pub section: usize,
    /// Theoretical points
    pub theoretical: SidePair<Point2D>,
    /// Nearest measured points
    pub actual: SidePair<Point2D>,
    /// Distance between the matched points, rounded to 3 decimals
    pub value: f64,
    /// Nominal C2
    pub nominal: f64,
}

impl C2Measurement {
    /// Value for reporting: undefined or above 1 mm becomes [`C2_INVALID`]
    pub fn reported(&self) -> f64 {
        if !self.value.is_finite() || self.value > 1.0 {
            C2_INVALID
        } else {
            self.value
        }
    }

    /// Reported value below nominal
    pub fn is_defective(&self) -> bool {
        self.reported() < self.nominal
    }

    /// `reported - nominal`, rounded to 2 decimals
    pub fn deviation(&self) -> f64 {
        round_to(self.reported() - self.nominal, 2)
    }

    /// Deviation magnitude larger than `tolerance`
    pub fn exceeds_tolerance(&self, tolerance: f64) -> bool {
        self.deviation().abs() > tolerance
    }
}

/// Convert `deg.min` notation (e.g. `49.22` = 49°22') to decimal degrees.
///
/// The minutes fraction is rounded to 2 decimals.
pub fn deg_min_to_decimal(value: f64) -> f64 {
    value.trunc() + round_to(value.fract() * 100.0 / 60.0, 2)
}

/// Theoretical concave and convex points of one section
pub fn theoretical_points(row: &C2SectionNominal, params: &C2Params) -> SidePair<Point2D> {
    let anchor = Point2D::new(row.b2, -(row.y2 + row.r2));
    let angle = 90.0 - row.alpha_deg + row.gamma2_deg + params.angle_offset_deg;
    let concave = anchor.offset_polar(angle, params.position);
    let convex = concave.offset_polar(angle - 90.0, row.nominal);
    SidePair::new(convex, concave)
}

/// Measure C2 on every control section.
pub fn measure_c2(
    measured: &SidePair<Profile>,
    control_sections: &[usize],
    params: &C2Params,
) -> Result<Vec<C2Measurement>> {
    if params.sections.len() != control_sections.len() {
        return Err(Error::ParameterCountMismatch {
            what: "C2 nominal rows",
            expected: control_sections.len(),
            found: params.sections.len(),
        });
    }
    control_sections
        .iter()
        .zip(&params.sections)
        .map(|(&section, row)| {
            let theoretical = theoretical_points(row, params);
            let concave = closest_point(
                theoretical.concave,
                &measured.concave.section(section)?.points(),
            )?;
            let convex = closest_point(
                theoretical.convex,
                &measured.convex.section(section)?.points(),
            )?;
            Ok(C2Measurement {
                section,
                theoretical,
                actual: SidePair::new(convex, concave),
                value: round_to(concave.distance(&convex), 3),
                nominal: row.nominal,
            })
        })
        .collect()
}
