//! Stock vectors and matrices.
//!
//! A stock entry is either a signed deviation in millimetres or `None`
//! ("no value") for points that were out of domain or beyond the clamp.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-point stock values, aligned index-for-index with a measured section.
pub type StockVector = Vec<Option<f64>>;

/// Stock values indexed by `[section][point]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMatrix {
    rows: BTreeMap<usize, StockVector>,
}

impl StockMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the stock vector of one section
    pub fn insert(&mut self, section: usize, row: StockVector) {
        self.rows.insert(section, row);
    }

    /// Stock vector of `section`
    pub fn row(&self, section: usize) -> Option<&StockVector> {
        self.rows.get(&section)
    }

    /// Iterate over `(section, row)` in ascending section order
    pub fn rows(&self) -> impl Iterator<Item = (usize, &StockVector)> {
        self.rows.iter().map(|(&k, v)| (k, v))
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no section was computed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All populated values, skipping "no value" entries
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.values().flatten().filter_map(|v| *v)
    }

    /// Rounded mean over the whole matrix
    pub fn mean(&self) -> Option<f64> {
        mean_stock(self.rows.values().flatten().copied())
    }

    /// Rounded mean of one section
    pub fn row_mean(&self, section: usize) -> Option<f64> {
        self.row(section)
            .and_then(|row| mean_stock(row.iter().copied()))
    }

    /// Unrounded mean of one section, for threshold comparisons
    pub fn row_raw_mean(&self, section: usize) -> Option<f64> {
        self.row(section).and_then(|row| raw_mean(row.iter().copied()))
    }
}

/// Mean of the populated entries, `None` when every entry is "no value".
pub fn raw_mean<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean of the populated entries rounded to 3 decimals.
///
/// Returns `None` when every entry is "no value".
pub fn mean_stock<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    raw_mean(values).map(|m| round_to(m, 3))
}

/// Round to a number of decimal places
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
