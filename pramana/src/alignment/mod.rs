//! Alignment of the measured profile pair to the template.
//!
//! ## Strategies
//!
//! | Strategy | Type | Cost |
//! |----------|------|------|
//! | A, border-trimmed centroid | [`BorderTrimFit`] | one pass over the control sections |
//! | B, resampled centroid + hill climb | [`ResampledCentroidFit`] | re-runs control stock per probe |
//!
//! Both implement [`BestFit`] and return a [`ShiftCorrection`] clamped to
//! their shift limit. Rigid operators and the accumulated
//! [`AlignmentState`] live in [`state`].

mod border_trim;
mod checks;
mod hill_climb;
mod resampled;
pub mod state;
mod traits;
mod types;

pub use border_trim::{BorderTrimConfig, BorderTrimFit};
pub use checks::{ScrapCheck, ScrapFinding, mean_control_stock, no_stock};
pub use hill_climb::{Probe, hill_climb};
pub use resampled::{ResampledCentroidConfig, ResampledCentroidFit};
pub use state::{AlignmentOp, AlignmentState, tilt};
pub use traits::{AlignmentScene, BestFit};
pub use types::{Axis, BestFitMethod, ShiftCorrection};
