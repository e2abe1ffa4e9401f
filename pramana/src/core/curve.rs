//! Section curves: one scanned or nominal cross-section as an ordered polyline.
//!
//! Coordinates are stored as separate `xs`/`ys` vectors so interpolation and
//! windowing can borrow contiguous slices.

use serde::{Deserialize, Serialize};

use super::Point2D;
use crate::error::{Error, Result};

/// Serialized form of a [`SectionCurve`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CurveData {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl TryFrom<CurveData> for SectionCurve {
    type Error = Error;

    fn try_from(data: CurveData) -> Result<Self> {
        SectionCurve::new(data.xs, data.ys)
    }
}

impl From<SectionCurve> for CurveData {
    fn from(curve: SectionCurve) -> Self {
        CurveData {
            xs: curve.xs,
            ys: curve.ys,
        }
    }
}

/// Ordered sequence of (x, y) pairs for one cross-section.
///
/// x values are not required to be sorted. Measured concave curves usually
/// arrive in descending x order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveData", into = "CurveData")]
pub struct SectionCurve {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SectionCurve {
    /// Create a curve from coordinate vectors of equal length.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Ok(Self { xs, ys })
    }

    /// Create a curve from points.
    pub fn from_points<I: IntoIterator<Item = Point2D>>(points: I) -> Self {
        let (xs, ys) = points.into_iter().map(|p| (p.x, p.y)).unzip();
        Self { xs, ys }
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True if the curve has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// X coordinates
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinates
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Point at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point2D> {
        Some(Point2D::new(*self.xs.get(index)?, *self.ys.get(index)?))
    }

    /// Iterate over points in order
    pub fn iter(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Point2D::new(x, y))
    }

    /// Collect points into a vector
    pub fn points(&self) -> Vec<Point2D> {
        self.iter().collect()
    }

    /// First point in storage order
    pub fn first(&self) -> Option<Point2D> {
        self.get(0)
    }

    /// Last point in storage order
    pub fn last(&self) -> Option<Point2D> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Index of the point with the smallest x (first one on ties)
    pub fn min_x_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &x) in self.xs.iter().enumerate() {
            if best.is_none_or(|(_, bx)| x < bx) {
                best = Some((i, x));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Largest x value
    pub fn max_x(&self) -> Option<f64> {
        self.xs.iter().copied().reduce(f64::max)
    }

    /// Centroid of all points
    pub fn centroid(&self) -> Option<Point2D> {
        centroid_of(self.iter())
    }

    /// Copy with every point translated
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            xs: self.xs.iter().map(|x| x + dx).collect(),
            ys: self.ys.iter().map(|y| y + dy).collect(),
        }
    }

    /// Copy rotated around the origin by `angle_deg` degrees
    pub fn rotated(&self, angle_deg: f64) -> Self {
        Self::from_points(self.iter().map(|p| p.rotate(angle_deg)))
    }

    /// Copy keeping only points accepted by `keep`
    pub fn filtered<F: Fn(&Point2D) -> bool>(&self, keep: F) -> Self {
        Self::from_points(self.iter().filter(|p| keep(p)))
    }

    /// Copy keeping points with `start <= x <= end`
    pub fn clipped_x(&self, start: f64, end: f64) -> Self {
        self.filtered(|p| p.x >= start && p.x <= end)
    }

    /// Copy with the point order reversed
    pub fn reversed(&self) -> Self {
        Self {
            xs: self.xs.iter().rev().copied().collect(),
            ys: self.ys.iter().rev().copied().collect(),
        }
    }

    /// Contiguous sub-range `[start, end]` (inclusive) in storage order.
    ///
    /// # Panics
    /// Panics if `end >= self.len()` or `start > end`.
    pub fn window(&self, start: usize, end: usize) -> (&[f64], &[f64]) {
        (&self.xs[start..=end], &self.ys[start..=end])
    }
}

/// Mean of a point set, `None` when empty.
pub fn centroid_of<I: IntoIterator<Item = Point2D>>(points: I) -> Option<Point2D> {
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for p in points {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    (n > 0).then(|| Point2D::new(sx / n as f64, sy / n as f64))
}
