//! # Pramana
//!
//! Stock measurement and alignment for scanned blade profiles.
//!
//! ## Overview
//!
//! A blade is scanned as a stack of planar sections. Each section has a
//! convex and a concave curve. Pramana compares every measured curve with
//! its template and reports the signed material allowance ("stock") at each
//! measured point:
//!
//! - **Positive** - material left to remove
//! - **Negative** - material missing (below template)
//! - **No value** - outside the template domain or beyond the clamp
//!
//! ## Features
//!
//! - **Stock Calculation**: local B-spline fit of the template around each point
//! - **Zone Aggregation**: six area zones per side, three special zones with bump detection
//! - **Best Fit**: border-trimmed centroid or resampled centroid with hill climbing
//! - **Part Checks**: scrap detection, no-stock detection, C2 trailing-edge dimension
//! - **Calibration**: per-section calibration vectors and master-scan fitting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pramana::{PramanaConfig, Workpiece};
//!
//! let config = PramanaConfig::load_default()?;
//! let mut workpiece = Workpiece::new(config, templates, measured)?;
//!
//! if workpiece.scrap_check()?.convex.is_none() {
//!     workpiece.apply_best_fit()?;
//! }
//! let area = workpiece.area_stock()?;
//! println!("convex zones: {:?}", area.convex.means());
//! ```
//!
//! ## Coordinate System
//!
//! - X: chordwise, leading edge at low x
//! - Y: thickness, convex side above concave side
//! - Sections: spanwise index, `section_pitch` mm apart
//!
//! All lengths are millimetres, all angles degrees.

#![warn(missing_docs)]

// Core types
pub mod core;

// Nearest point search, interpolation, linear algebra
pub mod geometry;

// Unified configuration
pub mod config;

// Stock calculation and aggregation
pub mod stock;

// Best fit and part checks
pub mod alignment;

// C2 dimensional check
pub mod c2;

// Calibration vectors and master fitting
pub mod calibration;

// Measurement session
pub mod workpiece;

mod error;

// Re-export commonly used types
pub use core::{
    Point2D, Profile, ScanMetadata, SectionCurve, Side, SidePair, StockMatrix, StockVector,
};

pub use error::{Error, Result};

pub use config::{ConfigLoadError, PramanaConfig};

pub use geometry::{Extrapolation, InterpolationKind, Interpolant};

pub use stock::{
    AreaStock, ControlStock, ExecutionMode, SpecialRegionParams, SpecialStock, StockParams,
    ZoneMeans, compute_stock,
};

pub use alignment::{
    AlignmentOp, AlignmentState, Axis, BestFit, BestFitMethod, BorderTrimFit,
    ResampledCentroidFit, ShiftCorrection,
};

pub use c2::{C2Measurement, C2Params, measure_c2};

pub use calibration::{
    AdditionalCalibration, CalibrationTargets, CalibrationVectors, create_calibration_vectors,
};

pub use workpiece::Workpiece;
