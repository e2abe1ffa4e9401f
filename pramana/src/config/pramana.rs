//! Root configuration and conversions to runtime parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alignment::{BorderTrimConfig, ResampledCentroidConfig, ScrapCheck};
use crate::c2::C2Params;
use crate::calibration::{AdditionalCalibration, CalibrationTargets, MeasurementFilter};
use crate::stock::{ExecutionMode, SpecialRegionParams, StockParams};

use super::best_fit::{BestFitSection, ChecksSection};
use super::calibration::CalibrationSection;
use super::error::ConfigLoadError;
use super::processing::ProcessingSection;
use super::profile::ProfileSection;
use super::stock::{SpecialSection, StockSection};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/pramana.yaml";

/// Full Pramana configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PramanaConfig {
    /// Stock calculator settings
    #[serde(default)]
    pub stock: StockSection,

    /// Best-fit settings
    #[serde(default)]
    pub best_fit: BestFitSection,

    /// Part-rejection checks
    #[serde(default)]
    pub checks: ChecksSection,

    /// Special-region settings
    #[serde(default)]
    pub special: SpecialSection,

    /// Control sections and C2 table
    #[serde(default)]
    pub profile: ProfileSection,

    /// Calibration settings
    #[serde(default)]
    pub calibration: CalibrationSection,

    /// Processing settings
    #[serde(default)]
    pub processing: ProcessingSection,
}

impl PramanaConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from [`DEFAULT_CONFIG_PATH`], or built-in defaults if absent
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{DEFAULT_CONFIG_PATH} not found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and table shapes
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let invalid = |e: crate::Error| ConfigLoadError::Invalid(e.to_string());
        self.stock_params().validate().map_err(invalid)?;
        self.special_params().validate().map_err(invalid)?;

        let positive = [
            ("best_fit.shift_limit", self.best_fit.shift_limit),
            ("best_fit.hill_step", self.best_fit.hill_step),
            ("best_fit.resample_step", self.best_fit.resample_step),
            ("profile.section_pitch", self.profile.section_pitch),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigLoadError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let ranges = [
            ("stock.area_sections", self.stock.area_sections),
            ("special.sections", self.special.sections),
            (
                "calibration sections",
                (self.calibration.start_section, self.calibration.end_section),
            ),
        ];
        for (name, (start, end)) in ranges {
            if start >= end {
                return Err(ConfigLoadError::Invalid(format!(
                    "{name}: empty range [{start}, {end})"
                )));
            }
        }

        if self.profile.control_sections.is_empty() {
            return Err(ConfigLoadError::Invalid(
                "profile.control_sections is empty".to_string(),
            ));
        }
        self.c2_params()?;
        Ok(())
    }

    /// Stock calculator parameters
    pub fn stock_params(&self) -> StockParams {
        self.stock.to_stock_params()
    }

    /// Special-region parameters
    pub fn special_params(&self) -> SpecialRegionParams {
        self.special.to_special_params()
    }

    /// Area section indices
    pub fn area_sections(&self) -> Vec<usize> {
        self.stock.area_section_list()
    }

    /// Special-region section indices
    pub fn special_sections(&self) -> Vec<usize> {
        self.special.section_list()
    }

    /// Control section indices
    pub fn control_sections(&self) -> &[usize] {
        &self.profile.control_sections
    }

    /// Scrap check parameters
    pub fn scrap_check(&self) -> ScrapCheck {
        self.checks.scrap_check()
    }

    /// Border-trim best-fit configuration
    pub fn border_trim_config(&self) -> BorderTrimConfig {
        self.best_fit.border_trim_config()
    }

    /// Resampled best-fit configuration
    pub fn resampled_config(&self) -> ResampledCentroidConfig {
        self.best_fit.resampled_config(self.scrap_check())
    }

    /// C2 parameters with angles converted to decimal degrees
    pub fn c2_params(&self) -> Result<C2Params, ConfigLoadError> {
        self.profile
            .c2
            .to_c2_params(self.profile.control_sections.len())
    }

    /// Calibration-fitting targets
    pub fn calibration_targets(&self) -> CalibrationTargets {
        self.calibration.calibration_targets()
    }

    /// Measurement preparation filter
    pub fn measurement_filter(&self) -> MeasurementFilter {
        self.calibration.measurement_filter()
    }

    /// Additional calibration
    pub fn additional_calibration(&self) -> &AdditionalCalibration {
        &self.calibration.additional
    }

    /// Convex/concave execution mode
    pub fn execution(&self) -> ExecutionMode {
        self.processing.execution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::BestFitMethod;
    use crate::geometry::InterpolationKind;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PramanaConfig::default();
        assert_eq!(config.stock.spline_borders, 5);
        assert_eq!(config.stock.spline_points, 50);
        assert_eq!(config.stock.spline_kind, InterpolationKind::Cubic);
        assert_eq!(config.best_fit.method, BestFitMethod::Resampled);
        assert_eq!(config.control_sections(), &[121, 221, 321, 341]);
        assert_eq!(config.area_sections().len(), 342 - 113);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PramanaConfig::from_yaml("{}").unwrap();
        assert_relative_eq!(config.stock.clamp, 0.8);
        assert_relative_eq!(config.checks.scrap_threshold, -0.08);
        assert_eq!(config.execution(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_partial_override() {
        let yaml = r#"
stock:
  spline_kind: linear
  clamp: 0.5
best_fit:
  method: border_trim
processing:
  execution: sequential
calibration:
  additional:
    convex:
      shift_x: 0.25
"#;
        let config = PramanaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.stock.spline_kind, InterpolationKind::Linear);
        assert_eq!(config.stock.spline_borders, 5);
        assert_relative_eq!(config.stock_params().clamp, 0.5);
        assert_eq!(config.best_fit.method, BestFitMethod::BorderTrim);
        assert_eq!(config.execution(), ExecutionMode::Sequential);
        assert_relative_eq!(config.additional_calibration().convex.shift_x, 0.25);
        // Unset fields of a partially given side fall back to zero
        assert_relative_eq!(config.additional_calibration().convex.shift_y, 0.0);
        // Untouched side keeps its defaults
        assert_relative_eq!(config.additional_calibration().concave.shift_x, 15.07);
    }

    #[test]
    fn test_c2_params_conversion() {
        let config = PramanaConfig::default();
        let params = config.c2_params().unwrap();
        assert_eq!(params.sections.len(), 4);
        assert_relative_eq!(params.sections[0].gamma2_deg, 49.37, epsilon = 1e-9);
        assert_relative_eq!(params.sections[0].b2, 7.31);
        assert_relative_eq!(params.angle_offset_deg, 13.0);
    }

    #[test]
    fn test_c2_table_shape_mismatch() {
        let yaml = "profile:\n  c2:\n    nominal: [0.5, 0.4]\n";
        let err = PramanaConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            PramanaConfig::from_yaml("stock:\n  clamp: -1.0\n"),
            Err(ConfigLoadError::Invalid(_))
        ));
        assert!(matches!(
            PramanaConfig::from_yaml("special:\n  width_range: [2.0, -2.0]\n"),
            Err(ConfigLoadError::Invalid(_))
        ));
        assert!(matches!(
            PramanaConfig::from_yaml("stock:\n  area_sections: [200, 100]\n"),
            Err(ConfigLoadError::Invalid(_))
        ));
        assert!(matches!(
            PramanaConfig::from_yaml("stock: [1, 2"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_conversions() {
        let config = PramanaConfig::default();
        let targets = config.calibration_targets();
        assert_eq!(targets.section_range, (150, 300));
        assert_eq!(targets.reference_area_code, 101);
        assert_relative_eq!(targets.concave_y, -5.0);

        let filter = config.measurement_filter();
        assert_eq!(filter.area_codes, vec![1, 2]);

        let resampled = config.resampled_config();
        assert_eq!(resampled.scrap.min_points, 8);
        assert_eq!(resampled.max_steps(), 10);

        let trim = config.border_trim_config();
        assert_relative_eq!(trim.x_bias, -0.1);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PramanaConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = PramanaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.profile.c2.alpha, config.profile.c2.alpha);
        assert_eq!(parsed.special.width_range, config.special.width_range);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = PramanaConfig::from_yaml(include_str!("../../configs/pramana.yaml")).unwrap();
        let defaults = PramanaConfig::default();
        assert_eq!(
            serde_yaml::to_string(&shipped).unwrap(),
            serde_yaml::to_string(&defaults).unwrap()
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "checks:\n  scrap_points: 5").unwrap();
        let config = PramanaConfig::load(file.path()).unwrap();
        assert_eq!(config.scrap_check().min_points, 5);

        let missing = PramanaConfig::load(Path::new("/nonexistent/pramana.yaml"));
        assert!(matches!(missing, Err(ConfigLoadError::Io(_))));
    }
}
