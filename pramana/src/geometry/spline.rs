//! Local 1D interpolation with interpolating B-splines.
//!
//! Windows are small (a handful of template points), so the collocation
//! system is solved densely.
//!
//! ## Knot placement
//!
//! End knots are repeated `degree + 1` times. Interior knots follow the
//! not-a-knot rule:
//!
//! | Degree | Interior knots |
//! |--------|----------------|
//! | 1 (linear) | every interior sample |
//! | 2 (quadratic) | midpoints between samples, dropping one at each end |
//! | 3 (cubic) | samples, dropping two at each end |
//!
//! ```text
//! cubic, 6 samples:   x0 x0 x0 x0 | x2 x3 | x5 x5 x5 x5
//! ```
//!
//! ## Extrapolation
//!
//! [`Extrapolation::Forbid`] rejects evaluation outside the sample window;
//! the stock calculator uses it. [`Extrapolation::Extend`] continues the
//! first/last polynomial piece; best-fit resampling uses it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::linalg::solve_dense;
use crate::core::Point2D;
use crate::error::{Error, Result};

const MAX_DEGREE: usize = 3;

/// Interpolation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationKind {
    /// Piecewise linear
    Linear,
    /// Quadratic spline
    Quadratic,
    /// Cubic spline
    #[default]
    Cubic,
}

impl InterpolationKind {
    /// Polynomial degree of each piece
    pub fn degree(self) -> usize {
        match self {
            InterpolationKind::Linear => 1,
            InterpolationKind::Quadratic => 2,
            InterpolationKind::Cubic => 3,
        }
    }

    /// Minimum number of samples for a fit
    pub fn min_points(self) -> usize {
        self.degree() + 1
    }
}

impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationKind::Linear => write!(f, "linear"),
            InterpolationKind::Quadratic => write!(f, "quadratic"),
            InterpolationKind::Cubic => write!(f, "cubic"),
        }
    }
}

/// Behavior outside the sample window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrapolation {
    /// Evaluation outside `[x_min, x_max]` is an error
    Forbid,
    /// Continue the end polynomial pieces
    Extend,
}

/// Fitted interpolant over one sample window.
#[derive(Clone, Debug)]
pub struct Interpolant {
    degree: usize,
    knots: Vec<f64>,
    coefficients: Vec<f64>,
    x_min: f64,
    x_max: f64,
    extrapolation: Extrapolation,
}

impl Interpolant {
    /// Fit an interpolant through `(xs, ys)`.
    ///
    /// Samples are sorted by x first. Fails if the window holds fewer than
    /// `kind.min_points()` samples or repeats an x value. The fit order is
    /// never lowered to make a small window work.
    pub fn fit(
        xs: &[f64],
        ys: &[f64],
        kind: InterpolationKind,
        extrapolation: Extrapolation,
    ) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let required = kind.min_points();
        if xs.len() < required {
            return Err(Error::DegenerateWindow {
                kind,
                points: xs.len(),
                required,
            });
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter(
                "interpolation window contains non-finite samples".to_string(),
            ));
        }

        let mut samples: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = samples.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(Error::DuplicateAbscissa { x: w[0].0 });
        }
        let (sx, sy): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();

        let degree = kind.degree();
        let n = sx.len();
        let knots = not_a_knot(&sx, degree);

        let mut collocation = vec![vec![0.0; n]; n];
        for (row, &x) in collocation.iter_mut().zip(&sx) {
            let span = find_span(n - 1, degree, x, &knots);
            let basis = basis_functions(span, x, degree, &knots);
            for (r, value) in basis.iter().take(degree + 1).enumerate() {
                row[span - degree + r] = *value;
            }
        }
        let coefficients = solve_dense(collocation, sy).ok_or(Error::SingularFit)?;

        Ok(Self {
            degree,
            knots,
            coefficients,
            x_min: sx[0],
            x_max: sx[n - 1],
            extrapolation,
        })
    }

    /// Sample window bounds `(x_min, x_max)`
    pub fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// Evaluate at `x`
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        if self.extrapolation == Extrapolation::Forbid {
            // Grid end points may land one ulp outside the window
            let tol = 1e-9 * (1.0 + (self.x_max - self.x_min).abs());
            if x < self.x_min - tol || x > self.x_max + tol {
                return Err(Error::OutsideInterpolationRange {
                    x,
                    min: self.x_min,
                    max: self.x_max,
                });
            }
        }
        let last = self.coefficients.len() - 1;
        let span = find_span(last, self.degree, x, &self.knots);
        let basis = basis_functions(span, x, self.degree, &self.knots);
        Ok(basis
            .iter()
            .take(self.degree + 1)
            .enumerate()
            .map(|(r, b)| b * self.coefficients[span - self.degree + r])
            .sum())
    }

    /// Evaluate on `count` evenly spaced points from `start` to `end` inclusive
    pub fn sample_count(&self, start: f64, end: f64, count: usize) -> Result<Vec<Point2D>> {
        linspace(start, end, count)
            .into_iter()
            .map(|x| Ok(Point2D::new(x, self.evaluate(x)?)))
            .collect()
    }

    /// Evaluate on `start, start + step, ...` below `end`
    pub fn sample_step(&self, start: f64, end: f64, step: f64) -> Result<Vec<Point2D>> {
        arange(start, end, step)?
            .into_iter()
            .map(|x| Ok(Point2D::new(x, self.evaluate(x)?)))
            .collect()
    }
}

/// Fit a local interpolant and evaluate it on a uniform grid with spacing `step`.
pub fn local_interpolate(
    xs: &[f64],
    ys: &[f64],
    start: f64,
    end: f64,
    kind: InterpolationKind,
    step: f64,
    extrapolation: Extrapolation,
) -> Result<Vec<Point2D>> {
    Interpolant::fit(xs, ys, kind, extrapolation)?.sample_step(start, end, step)
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Values `start + i * step` that lie below `end`.
pub fn arange(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    if step <= 0.0 || !step.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "grid step must be positive, got {step}"
        )));
    }
    let span = (end - start) / step;
    if !span.is_finite() || span <= 0.0 {
        return Ok(Vec::new());
    }
    let count = (span - 1e-9).ceil() as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Clamped not-a-knot knot vector for sorted abscissae.
fn not_a_knot(xs: &[f64], degree: usize) -> Vec<f64> {
    let n = xs.len();
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat_n(xs[0], degree + 1));
    if degree % 2 == 1 {
        let skip = degree.div_ceil(2);
        knots.extend_from_slice(&xs[skip..n - skip]);
    } else {
        let skip = degree / 2;
        knots.extend((skip..n - 1 - skip).map(|i| 0.5 * (xs[i] + xs[i + 1])));
    }
    knots.extend(std::iter::repeat_n(xs[n - 1], degree + 1));
    knots
}

/// Knot span for `x`, clamped to the first and last valid spans.
///
/// `last` is the index of the last coefficient.
fn find_span(last: usize, degree: usize, x: f64, knots: &[f64]) -> usize {
    if x >= knots[last + 1] {
        return last;
    }
    if x <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = last + 1;
    let mut mid = (low + high) / 2;
    while x < knots[mid] || x >= knots[mid + 1] {
        if x < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Non-zero basis functions `N[span-degree..=span]` at `x`.
fn basis_functions(span: usize, x: f64, degree: usize, knots: &[f64]) -> [f64; MAX_DEGREE + 1] {
    let mut n = [0.0; MAX_DEGREE + 1];
    let mut left = [0.0; MAX_DEGREE + 1];
    let mut right = [0.0; MAX_DEGREE + 1];
    n[0] = 1.0;
    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}
