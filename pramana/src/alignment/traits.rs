//! Best-fit strategy interface.

use super::types::ShiftCorrection;
use crate::core::{Profile, SidePair};
use crate::error::Result;
use crate::stock::StockParams;

/// Inputs shared by every best-fit strategy.
#[derive(Clone, Copy, Debug)]
pub struct AlignmentScene<'a> {
    /// Measured convex/concave profiles in their current position
    pub measured: &'a SidePair<Profile>,
    /// Template convex/concave profiles
    pub templates: &'a SidePair<Profile>,
    /// Canonical control sections
    pub control_sections: &'a [usize],
    /// Stock calculator tunables
    pub stock: &'a StockParams,
}

/// A strategy that proposes a translation re-centering the measurement
/// on the template.
///
/// Implementations must be deterministic and must never return a
/// component larger than [`BestFit::shift_limit`] in magnitude.
///
/// # Example
///
/// ```ignore
/// use pramana::alignment::{BestFit, BorderTrimFit};
///
/// fn propose<F: BestFit>(fit: &F, scene: &AlignmentScene) -> Result<ShiftCorrection> {
///     let shift = fit.best_fit(scene)?;
///     log::info!("{}: dx={:.3} dy={:.3}", fit.name(), shift.dx, shift.dy);
///     Ok(shift)
/// }
/// ```
pub trait BestFit: Send + Sync {
    /// Compute the correction for `scene`
    fn best_fit(&self, scene: &AlignmentScene<'_>) -> Result<ShiftCorrection>;

    /// Name of this strategy for logging
    fn name(&self) -> &str;

    /// Per-axis bound on the returned correction
    fn shift_limit(&self) -> f64;
}
