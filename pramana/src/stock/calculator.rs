//! Per-point signed stock of one measured section against its template.
//!
//! For each measured point P:
//!
//! ```text
//!   template  o----o----o----o----o----o----o----o----o
//!                      [  c-borders ... c ... c+borders ]   local window
//!                       ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~    spline, `points` samples
//!                                   ^
//!                                   | d (signed)
//!                                   P
//! ```
//!
//! 1. Out of domain (`px > max x`, or `px < min x` while below the template's
//!    first point) gives "no value".
//! 2. The nearest template point fixes the window, clamped to the curve.
//! 3. The window is interpolated without extrapolation and resampled.
//! 4. `d` is the distance to the nearest resampled point. The sign comes
//!    from comparing y with that point (flipped on the concave side).
//! 5. `|d| > clamp` gives "no value".

use serde::{Deserialize, Serialize};

use crate::core::{Point2D, SectionCurve, Side, StockVector};
use crate::error::{Error, Result};
use crate::geometry::{Extrapolation, InterpolationKind, Interpolant, nearest};

/// Tunables of the stock calculator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockParams {
    /// Half-width of the template window, in points.
    pub borders: usize,

    /// Number of resample points over the window.
    pub points: usize,

    /// Interpolation kind used for the window.
    pub kind: InterpolationKind,

    /// Largest accepted |stock| in mm. Larger values become "no value".
    pub clamp: f64,
}

impl Default for StockParams {
    fn default() -> Self {
        Self {
            borders: 5,
            points: 50,
            kind: InterpolationKind::Cubic,
            clamp: 0.8,
        }
    }
}

impl StockParams {
    /// Create parameters with the default clamp
    pub fn new(borders: usize, points: usize, kind: InterpolationKind) -> Self {
        Self {
            borders,
            points,
            kind,
            ..Default::default()
        }
    }

    /// Set the clamp bound
    pub fn with_clamp(mut self, clamp: f64) -> Self {
        self.clamp = clamp;
        self
    }

    /// Check ranges: `borders >= 1`, `points >= 2`, `clamp > 0`
    pub fn validate(&self) -> Result<()> {
        if self.borders < 1 {
            return Err(Error::InvalidParameter(
                "spline borders must be at least 1".to_string(),
            ));
        }
        if self.points < 2 {
            return Err(Error::InvalidParameter(
                "spline points must be at least 2".to_string(),
            ));
        }
        if self.clamp.is_nan() || self.clamp <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "stock clamp must be positive, got {}",
                self.clamp
            )));
        }
        Ok(())
    }
}

/// Signed stock of every point of `measured` against `template`.
///
/// The result is aligned index-for-index with `measured`. Fails only on
/// precondition violations: empty template, invalid parameters, or a window
/// too small for `params.kind`.
pub fn compute_stock(
    measured: &SectionCurve,
    template: &SectionCurve,
    side: Side,
    params: &StockParams,
) -> Result<StockVector> {
    params.validate()?;
    if measured.is_empty() {
        return Ok(Vec::new());
    }
    let (Some(min_index), Some(max_x)) = (template.min_x_index(), template.max_x()) else {
        return Err(Error::EmptyCandidates);
    };
    let leading = template.get(min_index).ok_or(Error::EmptyCandidates)?;

    measured
        .iter()
        .map(|p| {
            if p.x > max_x || (p.x < leading.x && p.y < leading.y) {
                Ok(None)
            } else {
                point_stock(p, template, side, params)
            }
        })
        .collect()
}

fn point_stock(
    p: Point2D,
    template: &SectionCurve,
    side: Side,
    params: &StockParams,
) -> Result<Option<f64>> {
    let center = nearest(p, template.iter())?.index;
    let start = center.saturating_sub(params.borders);
    let end = (center + params.borders).min(template.len() - 1);
    let (wx, wy) = template.window(start, end);

    let spline = Interpolant::fit(wx, wy, params.kind, Extrapolation::Forbid)?;
    let resampled = spline.sample_count(wx[0], wx[wx.len() - 1], params.points)?;
    let hit = nearest(p, resampled)?;

    let missing = match side {
        Side::Convex => p.y < hit.point.y,
        Side::Concave => p.y > hit.point.y,
    };
    let d = if missing { -hit.distance } else { hit.distance };

    Ok((d.abs() <= params.clamp).then_some(d))
}
