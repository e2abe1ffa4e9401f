//! Stock calculation and special-region configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::geometry::InterpolationKind;
use crate::stock::{SpecialRegionParams, StockParams};

/// Stock calculator settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockSection {
    /// Half-width of the template window around the nearest point
    #[serde(default = "defaults::spline_borders")]
    pub spline_borders: usize,

    /// Resample points over the window
    #[serde(default = "defaults::spline_points")]
    pub spline_points: usize,

    /// Interpolation kind: linear, quadratic or cubic
    #[serde(default = "defaults::spline_kind")]
    pub spline_kind: InterpolationKind,

    /// Stock magnitude above which a point has no value (mm)
    #[serde(default = "defaults::stock_clamp")]
    pub clamp: f64,

    /// Chordwise split between leading and trailing zones (mm)
    #[serde(default = "defaults::edge_split_x")]
    pub edge_split_x: f64,

    /// Sections `[start, end)` of the area calculation
    #[serde(default = "defaults::area_sections")]
    pub area_sections: (usize, usize),
}

impl Default for StockSection {
    fn default() -> Self {
        Self {
            spline_borders: defaults::spline_borders(),
            spline_points: defaults::spline_points(),
            spline_kind: defaults::spline_kind(),
            clamp: defaults::stock_clamp(),
            edge_split_x: defaults::edge_split_x(),
            area_sections: defaults::area_sections(),
        }
    }
}

impl StockSection {
    /// Convert to calculator parameters
    pub fn to_stock_params(&self) -> StockParams {
        StockParams::new(self.spline_borders, self.spline_points, self.spline_kind)
            .with_clamp(self.clamp)
    }

    /// Area section indices
    pub fn area_section_list(&self) -> Vec<usize> {
        (self.area_sections.0..self.area_sections.1).collect()
    }
}

/// Special-region (bump detection) settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpecialSection {
    /// Chordwise range used when no anomaly is found (mm)
    #[serde(default = "defaults::width_range")]
    pub width_range: (f64, f64),

    /// Section mean that flags an anomaly (mm)
    #[serde(default = "defaults::anomaly_threshold")]
    pub anomaly_threshold: f64,

    /// Switch to the full chord when an anomaly is found
    #[serde(default = "defaults::enabled")]
    pub check_anomaly: bool,

    /// Sections `[start, end)` of the special calculation
    #[serde(default = "defaults::area_sections")]
    pub sections: (usize, usize),
}

impl Default for SpecialSection {
    fn default() -> Self {
        Self {
            width_range: defaults::width_range(),
            anomaly_threshold: defaults::anomaly_threshold(),
            check_anomaly: defaults::enabled(),
            sections: defaults::area_sections(),
        }
    }
}

impl SpecialSection {
    /// Convert to special-region parameters
    pub fn to_special_params(&self) -> SpecialRegionParams {
        SpecialRegionParams {
            width_range: self.width_range,
            anomaly_threshold: self.anomaly_threshold,
            check_anomaly: self.check_anomaly,
        }
    }

    /// Special section indices
    pub fn section_list(&self) -> Vec<usize> {
        (self.sections.0..self.sections.1).collect()
    }
}
