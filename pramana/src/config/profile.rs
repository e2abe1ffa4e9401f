//! Blade profile configuration section: control sections and the C2 table.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigLoadError;
use crate::c2::{C2Params, C2SectionNominal, deg_min_to_decimal};

/// C2 nominal table, one column per control section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct C2Section {
    /// Alpha angles (degrees.minutes)
    #[serde(default = "defaults::c2_alpha")]
    pub alpha: Vec<f64>,

    /// Gamma2 angles (degrees.minutes)
    #[serde(default = "defaults::c2_gamma2")]
    pub gamma2: Vec<f64>,

    /// Anchor x distances (mm)
    #[serde(default = "defaults::c2_b2")]
    pub b2: Vec<f64>,

    /// Nominal C2 values (mm)
    #[serde(default = "defaults::c2_nominal")]
    pub nominal: Vec<f64>,

    /// Trailing-edge y offsets (mm)
    #[serde(default = "defaults::c2_y2")]
    pub y2: Vec<f64>,

    /// Trailing-edge radii (mm)
    #[serde(default = "defaults::c2_r2")]
    pub r2: Vec<f64>,

    /// Accepted deviation from nominal (mm)
    #[serde(default = "defaults::c2_tolerance")]
    pub tolerance: f64,

    /// Anchor to concave theoretical point distance (mm)
    #[serde(default = "defaults::c2_position")]
    pub position: f64,

    /// Constant added to the polar angle (degrees)
    #[serde(default = "defaults::c2_angle_offset")]
    pub angle_offset_deg: f64,
}

impl Default for C2Section {
    fn default() -> Self {
        Self {
            alpha: defaults::c2_alpha(),
            gamma2: defaults::c2_gamma2(),
            b2: defaults::c2_b2(),
            nominal: defaults::c2_nominal(),
            y2: defaults::c2_y2(),
            r2: defaults::c2_r2(),
            tolerance: defaults::c2_tolerance(),
            position: defaults::c2_position(),
            angle_offset_deg: defaults::c2_angle_offset(),
        }
    }
}

impl C2Section {
    /// Build C2 parameters, checking every column has `expected` entries.
    pub fn to_c2_params(&self, expected: usize) -> Result<C2Params, ConfigLoadError> {
        let columns: [(&str, &Vec<f64>); 6] = [
            ("alpha", &self.alpha),
            ("gamma2", &self.gamma2),
            ("b2", &self.b2),
            ("nominal", &self.nominal),
            ("y2", &self.y2),
            ("r2", &self.r2),
        ];
        for (name, column) in columns {
            if column.len() != expected {
                return Err(ConfigLoadError::Invalid(format!(
                    "profile.c2.{name}: expected {expected} values, found {}",
                    column.len()
                )));
            }
        }

        let sections = (0..expected)
            .map(|i| C2SectionNominal {
                b2: self.b2[i],
                y2: self.y2[i],
                r2: self.r2[i],
                alpha_deg: deg_min_to_decimal(self.alpha[i]),
                gamma2_deg: deg_min_to_decimal(self.gamma2[i]),
                nominal: self.nominal[i],
            })
            .collect();

        Ok(C2Params {
            sections,
            position: self.position,
            angle_offset_deg: self.angle_offset_deg,
        })
    }
}

/// Blade profile settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileSection {
    /// Control section indices
    #[serde(default = "defaults::control_sections")]
    pub control_sections: Vec<usize>,

    /// Distance between consecutive sections (mm)
    #[serde(default = "defaults::section_pitch")]
    pub section_pitch: f64,

    /// C2 nominal table
    #[serde(default)]
    pub c2: C2Section,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            control_sections: defaults::control_sections(),
            section_pitch: defaults::section_pitch(),
            c2: C2Section::default(),
        }
    }
}
