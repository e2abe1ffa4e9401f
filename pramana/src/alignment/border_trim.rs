//! Strategy A: border-trimmed centroid with empirical bias.
//!
//! Per control section:
//!
//! 1. Drop convex measured points above `convex_y_limit`.
//! 2. Overlap range of each side = `[max(first x), min(last x)]` of the
//!    measured and template curves. The concave measured curve is read in
//!    reverse. The section range is the intersection of both sides.
//! 3. Clip all four curves to that range and take the centroid of the
//!    measured union and of the template union.
//! 4. `dx = measured.x - template.x`, `dy = template.y - measured.y`.
//!
//! The mean delta is biased (`x + x_bias`, `y + y_bias`, negative y damped)
//! and clamped to `±shift_limit`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::traits::{AlignmentScene, BestFit};
use super::types::ShiftCorrection;
use crate::core::{Point2D, SectionCurve, centroid_of};
use crate::error::{Error, Result};

/// Configuration for [`BorderTrimFit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderTrimConfig {
    /// Convex measured points with y at or above this are ignored (mm)
    pub convex_y_limit: f64,
    /// Added to the mean x delta (mm)
    pub x_bias: f64,
    /// Added to the mean y delta (mm)
    pub y_bias: f64,
    /// Factor applied to a negative biased y shift
    pub negative_y_damping: f64,
    /// Per-axis clamp (mm)
    pub shift_limit: f64,
}

impl Default for BorderTrimConfig {
    fn default() -> Self {
        Self {
            convex_y_limit: 4.0,
            x_bias: -0.1,
            y_bias: 0.06,
            negative_y_damping: 0.6,
            shift_limit: 0.1,
        }
    }
}

/// Border-trimmed centroid best fit.
#[derive(Clone, Debug, Default)]
pub struct BorderTrimFit {
    config: BorderTrimConfig,
}

impl BorderTrimFit {
    /// Create with configuration
    pub fn new(config: BorderTrimConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &BorderTrimConfig {
        &self.config
    }

    fn section_delta(&self, scene: &AlignmentScene<'_>, section: usize) -> Result<Point2D> {
        let limit = self.config.convex_y_limit;
        let cv = scene
            .measured
            .convex
            .section(section)?
            .filtered(|p| p.y < limit);
        let cc = scene.measured.concave.section(section)?;
        let tcv = scene.templates.convex.section(section)?;
        let tcc = scene.templates.concave.section(section)?;

        let (cv_start, cv_end) = overlap(&cv, tcv, section)?;
        let (cc_start, cc_end) = overlap(&cc.reversed(), tcc, section)?;
        let start = cv_start.max(cc_start);
        let end = cv_end.min(cc_end);

        let measured = centroid_of(
            cv.clipped_x(start, end)
                .iter()
                .chain(cc.clipped_x(start, end).iter()),
        )
        .ok_or(Error::EmptyOverlap { section })?;
        let template = centroid_of(
            tcv.clipped_x(start, end)
                .iter()
                .chain(tcc.clipped_x(start, end).iter()),
        )
        .ok_or(Error::EmptyOverlap { section })?;

        Ok(Point2D::new(measured.x - template.x, template.y - measured.y))
    }
}

/// `[max(first x), min(last x)]` of a measured and a template curve.
fn overlap(measured: &SectionCurve, template: &SectionCurve, section: usize) -> Result<(f64, f64)> {
    let (Some(mf), Some(ml)) = (measured.first(), measured.last()) else {
        return Err(Error::EmptySection { section });
    };
    let (Some(tf), Some(tl)) = (template.first(), template.last()) else {
        return Err(Error::EmptySection { section });
    };
    Ok((mf.x.max(tf.x), ml.x.min(tl.x)))
}

impl BestFit for BorderTrimFit {
    fn best_fit(&self, scene: &AlignmentScene<'_>) -> Result<ShiftCorrection> {
        if scene.control_sections.is_empty() {
            return Err(Error::InvalidParameter(
                "best fit needs at least one control section".to_string(),
            ));
        }
        let deltas = scene
            .control_sections
            .iter()
            .map(|&s| self.section_delta(scene, s))
            .collect::<Result<Vec<_>>>()?;
        let mean = centroid_of(deltas.iter().copied()).ok_or(Error::EmptyCandidates)?;

        let x = mean.x + self.config.x_bias;
        let mut y = mean.y + self.config.y_bias;
        if y < 0.0 {
            y *= self.config.negative_y_damping;
        }
        let shift = ShiftCorrection::new(x, y)
            .finite()?
            .clamped(self.config.shift_limit);
        debug!(
            "[BorderTrim] mean delta=({:.4}, {:.4}) shift=({:.3}, {:.3})",
            mean.x, mean.y, shift.dx, shift.dy
        );
        Ok(shift)
    }

    fn name(&self) -> &str {
        "border_trim"
    }

    fn shift_limit(&self) -> f64 {
        self.config.shift_limit
    }
}
