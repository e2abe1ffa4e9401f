//! Part-rejection checks over control-section stock.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SidePair};
use crate::stock::ControlStock;

/// Threshold check for scraped (over-machined) control sections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrapCheck {
    /// Stock below this value counts as a bad point (mm)
    pub threshold: f64,
    /// Bad points in one section that flag the part
    pub min_points: usize,
}

impl Default for ScrapCheck {
    fn default() -> Self {
        Self {
            threshold: -0.08,
            min_points: 8,
        }
    }
}

/// First control section that failed the scrap check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrapFinding {
    /// Side of the failing section
    pub side: Side,
    /// Failing section index
    pub section: usize,
    /// Stock values below the threshold
    pub bad_values: Vec<f64>,
}

impl ScrapCheck {
    /// First section of `stock` with at least `min_points` values below `threshold`
    pub fn find(&self, stock: &ControlStock) -> Option<ScrapFinding> {
        stock.sections.iter().find_map(|&section| {
            let bad_values: Vec<f64> = stock
                .matrix
                .row(section)?
                .iter()
                .flatten()
                .copied()
                .filter(|&v| v < self.threshold)
                .collect();
            (bad_values.len() >= self.min_points).then(|| ScrapFinding {
                side: stock.side,
                section,
                bad_values,
            })
        })
    }

    /// Findings for both sides
    pub fn check_pair(&self, stock: &SidePair<ControlStock>) -> SidePair<Option<ScrapFinding>> {
        SidePair::new(self.find(&stock.convex), self.find(&stock.concave))
    }

    /// True if either side is scraped
    pub fn is_scraped(&self, stock: &SidePair<ControlStock>) -> bool {
        self.find(&stock.convex).is_some() || self.find(&stock.concave).is_some()
    }
}

/// Mean over control positions of `convex mean + concave mean`.
///
/// `None` if any section mean is undefined.
pub fn mean_control_stock(stock: &SidePair<ControlStock>) -> Option<f64> {
    let n = stock.convex.means.len();
    if n == 0 || stock.concave.means.len() != n {
        return None;
    }
    let mut total = 0.0;
    for (cv, cc) in stock.convex.means.iter().zip(&stock.concave.means) {
        total += (*cv)? + (*cc)?;
    }
    Some(total / n as f64)
}

/// True when no control position has `convex + concave` mean above `threshold`.
///
/// Positions where either mean is undefined do not count as stock.
pub fn no_stock(stock: &SidePair<ControlStock>, threshold: f64) -> bool {
    !stock
        .convex
        .means
        .iter()
        .zip(&stock.concave.means)
        .any(|(cv, cc)| matches!((cv, cc), (Some(a), Some(b)) if a + b > threshold))
}
