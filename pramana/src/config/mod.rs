//! Unified configuration loading for Pramana.
//!
//! Loads all configuration from a single YAML file with defaults for every
//! key, so an empty document is a valid configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pramana::config::PramanaConfig;
//!
//! // Load from default path (configs/pramana.yaml)
//! let config = PramanaConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = PramanaConfig::default();
//!
//! // Convert to runtime parameters
//! let stock_params = config.stock_params();
//! let c2_params = config.c2_params()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`StockSection`] | Interpolation window, clamp, zone split, area sections |
//! | [`BestFitSection`] | Strategy selection, shift limit, hill-climb step |
//! | [`ChecksSection`] | Scrap and no-stock thresholds |
//! | [`SpecialSection`] | Special-region width and anomaly threshold |
//! | [`ProfileSection`] | Control sections, section pitch, C2 table |
//! | [`CalibrationSection`] | Additional calibration and master targets |
//! | [`ProcessingSection`] | Sequential or parallel side aggregation |
//!
//! ## Example YAML
//!
//! ```yaml
//! stock:
//!   spline_kind: cubic
//!   clamp: 0.8
//!
//! best_fit:
//!   method: resampled     # or border_trim
//!   shift_limit: 0.1
//!
//! profile:
//!   control_sections: [121, 221, 321, 341]
//!
//! processing:
//!   execution: parallel
//! ```

mod best_fit;
mod calibration;
mod defaults;
mod error;
mod pramana;
mod processing;
mod profile;
mod stock;

// Re-export main types
pub use error::ConfigLoadError;
pub use pramana::{DEFAULT_CONFIG_PATH, PramanaConfig};

// Re-export section types
pub use best_fit::{BestFitSection, ChecksSection};
pub use calibration::CalibrationSection;
pub use processing::ProcessingSection;
pub use profile::{C2Section, ProfileSection};
pub use stock::{SpecialSection, StockSection};
