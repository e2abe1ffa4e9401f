//! Calibration configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::calibration::{AdditionalCalibration, CalibrationTargets, MeasurementFilter};

/// Calibration settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationSection {
    /// Fine per-side corrections
    #[serde(default)]
    pub additional: AdditionalCalibration,

    /// First section of the regression
    #[serde(default = "default_start")]
    pub start_section: usize,

    /// End section of the regression (exclusive)
    #[serde(default = "default_end")]
    pub end_section: usize,

    /// Expected master first-point position `[convex_x, convex_y, concave_x, concave_y]`
    #[serde(default = "default_targets")]
    pub targets: [f64; 4],

    /// Area-to-measure code of a master scan
    #[serde(default = "defaults::reference_area_code")]
    pub reference_area_code: i32,

    /// Convex y limit for filtered area codes (mm)
    #[serde(default = "defaults::convex_y_filter")]
    pub convex_y_filter: f64,

    /// Area codes the convex y limit applies to
    #[serde(default = "defaults::filter_area_codes")]
    pub filter_area_codes: Vec<i32>,
}

fn default_start() -> usize {
    defaults::calibration_sections().0
}

fn default_end() -> usize {
    defaults::calibration_sections().1
}

fn default_targets() -> [f64; 4] {
    [-7.5, 5.0, -7.5, -5.0]
}

impl Default for CalibrationSection {
    fn default() -> Self {
        Self {
            additional: AdditionalCalibration::default(),
            start_section: default_start(),
            end_section: default_end(),
            targets: default_targets(),
            reference_area_code: defaults::reference_area_code(),
            convex_y_filter: defaults::convex_y_filter(),
            filter_area_codes: defaults::filter_area_codes(),
        }
    }
}

impl CalibrationSection {
    /// Calibration-fitting targets
    pub fn calibration_targets(&self) -> CalibrationTargets {
        let [convex_x, convex_y, concave_x, concave_y] = self.targets;
        CalibrationTargets {
            convex_x,
            convex_y,
            concave_x,
            concave_y,
            reference_area_code: self.reference_area_code,
            section_range: (self.start_section, self.end_section),
        }
    }

    /// Measurement preparation filter
    pub fn measurement_filter(&self) -> MeasurementFilter {
        MeasurementFilter {
            convex_y_limit: self.convex_y_filter,
            area_codes: self.filter_area_codes.clone(),
        }
    }
}
