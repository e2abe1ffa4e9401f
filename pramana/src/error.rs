//! Error types for pramana.
//!
//! Invalid measurement points are not errors: they surface as `None`
//! entries in a [`StockVector`](crate::core::StockVector). Everything here is
//! a precondition violation and is fatal to the computation that raised it.

use crate::config::ConfigLoadError;
use crate::core::Side;
use crate::geometry::InterpolationKind;

/// Errors raised by the metrology core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Nearest-point search was given no candidates.
    #[error("nearest-point search called with no candidates")]
    EmptyCandidates,

    /// Interpolation window is too small for the requested fit order.
    #[error("{kind} interpolation needs at least {required} points, window has {points}")]
    DegenerateWindow {
        /// Requested interpolation kind
        kind: InterpolationKind,
        /// Points available in the window
        points: usize,
        /// Minimum points for `kind`
        required: usize,
    },

    /// Two samples in an interpolation window share the same x.
    #[error("duplicate abscissa x = {x} in interpolation window")]
    DuplicateAbscissa {
        /// The repeated x value
        x: f64,
    },

    /// Collocation system could not be solved.
    #[error("interpolation system is singular")]
    SingularFit,

    /// Evaluation outside the window of a non-extrapolating interpolant.
    #[error("x = {x} is outside the interpolation range [{min}, {max}]")]
    OutsideInterpolationRange {
        /// Requested abscissa
        x: f64,
        /// Lower bound of the sample window
        min: f64,
        /// Upper bound of the sample window
        max: f64,
    },

    /// Coordinate arrays of different lengths.
    #[error("coordinate arrays differ in length: {xs} x values, {ys} y values")]
    LengthMismatch {
        /// Number of x values
        xs: usize,
        /// Number of y values
        ys: usize,
    },

    /// A required section is absent from a profile.
    #[error("{side} profile has no section {section}")]
    MissingSection {
        /// Side of the profile searched
        side: Side,
        /// Requested section index
        section: usize,
    },

    /// A required section has no points.
    #[error("section {section} has no points")]
    EmptySection {
        /// Section index
        section: usize,
    },

    /// Measured and template curves share no x-range.
    #[error("section {section}: measured and template curves do not overlap")]
    EmptyOverlap {
        /// Section index
        section: usize,
    },

    /// A best-fit strategy produced a NaN or infinite shift.
    #[error("best-fit correction is not finite: dx = {dx}, dy = {dy}")]
    NonFiniteCorrection {
        /// X component
        dx: f64,
        /// Y component
        dy: f64,
    },

    /// Scan metadata does not match what the operation requires.
    #[error("wrong profile kind: expected area code {expected}, found {found:?}")]
    WrongProfileKind {
        /// Required area-to-measure code
        expected: i32,
        /// Code carried by the profile, if any
        found: Option<i32>,
    },

    /// A profile of the wrong side was supplied.
    #[error("expected a {expected} profile, got {found}")]
    WrongSide {
        /// Side the operation needs
        expected: Side,
        /// Side it was given
        found: Side,
    },

    /// Calibration vectors are shorter than the section index.
    #[error("calibration vectors do not cover section {section}")]
    CalibrationOutOfRange {
        /// Uncovered section index
        section: usize,
    },

    /// Not enough sections in the regression range.
    #[error("calibration fit needs two sections in {start}..{end}, found {found}")]
    InsufficientCalibrationData {
        /// First section of the range
        start: usize,
        /// End of the range (exclusive)
        end: usize,
        /// Usable sections found
        found: usize,
    },

    /// Parallel parameter lists disagree in length.
    #[error("expected {expected} {what}, got {found}")]
    ParameterCountMismatch {
        /// What was being counted
        what: &'static str,
        /// Expected count
        expected: usize,
        /// Actual count
        found: usize,
    },

    /// A tunable is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

/// Result type for pramana operations.
pub type Result<T> = std::result::Result<T, Error>;
