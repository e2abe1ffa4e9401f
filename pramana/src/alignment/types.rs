//! Alignment value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::round_to;
use crate::error::{Error, Result};

/// Translation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Chord direction
    X,
    /// Thickness direction
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Best-fit strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestFitMethod {
    /// Border-trimmed centroid with empirical bias (strategy A)
    BorderTrim,
    /// Resampled centroid plus hill climbing (strategy B)
    #[default]
    Resampled,
}

/// Translation correction returned by a best-fit strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftCorrection {
    /// X translation (mm)
    pub dx: f64,
    /// Y translation (mm)
    pub dy: f64,
}

impl ShiftCorrection {
    /// Create a correction
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Component along `axis`
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }

    /// Each component clamped to `[-limit, limit]`; NaN stays NaN
    pub fn clamped(&self, limit: f64) -> Self {
        let bound = |v: f64| if v.is_nan() { v } else { v.max(-limit).min(limit) };
        Self::new(bound(self.dx), bound(self.dy))
    }

    /// `self` if both components are finite, else [`Error::NonFiniteCorrection`]
    pub fn finite(self) -> Result<Self> {
        if self.dx.is_finite() && self.dy.is_finite() {
            Ok(self)
        } else {
            Err(Error::NonFiniteCorrection {
                dx: self.dx,
                dy: self.dy,
            })
        }
    }

    /// Each component rounded to `decimals` places
    pub fn rounded(&self, decimals: i32) -> Self {
        Self::new(round_to(self.dx, decimals), round_to(self.dy, decimals))
    }
}
