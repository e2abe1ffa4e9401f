//! Best-fit and part-check configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::alignment::{BestFitMethod, BorderTrimConfig, ResampledCentroidConfig, ScrapCheck};

/// Best-fit settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BestFitSection {
    /// Strategy: `border_trim` or `resampled`
    #[serde(default)]
    pub method: BestFitMethod,

    /// Per-axis clamp of the correction (mm)
    #[serde(default = "defaults::shift_limit")]
    pub shift_limit: f64,

    /// Hill-climb step (mm)
    #[serde(default = "defaults::hill_step")]
    pub hill_step: f64,

    /// Resampling grid spacing (mm)
    #[serde(default = "defaults::resample_step")]
    pub resample_step: f64,

    /// Convex points at or above this y are ignored by border trim (mm)
    #[serde(default = "defaults::convex_y_limit")]
    pub convex_y_limit: f64,

    /// Border-trim x bias (mm)
    #[serde(default = "defaults::x_bias")]
    pub x_bias: f64,

    /// Border-trim y bias (mm)
    #[serde(default = "defaults::y_bias")]
    pub y_bias: f64,

    /// Border-trim damping of a negative y shift
    #[serde(default = "defaults::negative_y_damping")]
    pub negative_y_damping: f64,

    /// Decimals of the applied correction
    #[serde(default = "defaults::round_decimals")]
    pub round_decimals: i32,
}

impl Default for BestFitSection {
    fn default() -> Self {
        Self {
            method: BestFitMethod::default(),
            shift_limit: defaults::shift_limit(),
            hill_step: defaults::hill_step(),
            resample_step: defaults::resample_step(),
            convex_y_limit: defaults::convex_y_limit(),
            x_bias: defaults::x_bias(),
            y_bias: defaults::y_bias(),
            negative_y_damping: defaults::negative_y_damping(),
            round_decimals: defaults::round_decimals(),
        }
    }
}

impl BestFitSection {
    /// Border-trim strategy configuration
    pub fn border_trim_config(&self) -> BorderTrimConfig {
        BorderTrimConfig {
            convex_y_limit: self.convex_y_limit,
            x_bias: self.x_bias,
            y_bias: self.y_bias,
            negative_y_damping: self.negative_y_damping,
            shift_limit: self.shift_limit,
        }
    }

    /// Resampled strategy configuration
    pub fn resampled_config(&self, scrap: ScrapCheck) -> ResampledCentroidConfig {
        ResampledCentroidConfig {
            resample_step: self.resample_step,
            hill_step: self.hill_step,
            shift_limit: self.shift_limit,
            scrap,
        }
    }
}

/// Part-rejection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChecksSection {
    /// Stock below this counts as scraped (mm)
    #[serde(default = "defaults::scrap_threshold")]
    pub scrap_threshold: f64,

    /// Scraped points in one control section that reject the part
    #[serde(default = "defaults::scrap_points")]
    pub scrap_points: usize,

    /// Control stock at or below this on every section means no stock left (mm)
    #[serde(default = "defaults::no_stock_threshold")]
    pub no_stock_threshold: f64,
}

impl Default for ChecksSection {
    fn default() -> Self {
        Self {
            scrap_threshold: defaults::scrap_threshold(),
            scrap_points: defaults::scrap_points(),
            no_stock_threshold: defaults::no_stock_threshold(),
        }
    }
}

impl ChecksSection {
    /// Scrap check parameters
    pub fn scrap_check(&self) -> ScrapCheck {
        ScrapCheck {
            threshold: self.scrap_threshold,
            min_points: self.scrap_points,
        }
    }
}
