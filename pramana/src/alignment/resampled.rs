//! Strategy B: resampled centroid refined by hill climbing.
//!
//! Per control section both measured curves are resampled on the template
//! grid `[convex template start, concave template end)` with spacing
//! `resample_step`, extrapolating where the scan is short. The concave
//! measured curve is reversed first. If the resampled convex curve starts
//! below the concave one its first two samples are dropped. The section
//! delta is `template centroid - measured centroid`.
//!
//! The mean delta is then refined per axis: the control-section mean stock
//! is hill-climbed in both directions from the current position and the
//! larger accepted offset is added. A probe is blocked when the scrap check
//! fires. The result is clamped to `±shift_limit`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::checks::{ScrapCheck, mean_control_stock};
use super::hill_climb::{Probe, hill_climb};
use super::traits::{AlignmentScene, BestFit};
use super::types::{Axis, ShiftCorrection};
use crate::core::{Point2D, Profile, SidePair, centroid_of};
use crate::error::{Error, Result};
use crate::geometry::{Extrapolation, Interpolant};
use crate::stock::control_stock;

/// Configuration for [`ResampledCentroidFit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResampledCentroidConfig {
    /// Grid spacing for resampling measured curves (mm)
    pub resample_step: f64,
    /// Hill-climb step (mm)
    pub hill_step: f64,
    /// Per-axis clamp (mm); also bounds the hill climb
    pub shift_limit: f64,
    /// Predicate that blocks a hill-climb probe
    pub scrap: ScrapCheck,
}

impl Default for ResampledCentroidConfig {
    fn default() -> Self {
        Self {
            resample_step: 0.01,
            hill_step: 0.01,
            shift_limit: 0.1,
            scrap: ScrapCheck::default(),
        }
    }
}

impl ResampledCentroidConfig {
    /// Maximum hill-climb probes per direction
    pub fn max_steps(&self) -> usize {
        if self.hill_step <= 0.0 {
            return 0;
        }
        (self.shift_limit / self.hill_step).round() as usize
    }
}

/// Resampled centroid best fit with local search.
#[derive(Clone, Debug, Default)]
pub struct ResampledCentroidFit {
    config: ResampledCentroidConfig,
}

impl ResampledCentroidFit {
    /// Create with configuration
    pub fn new(config: ResampledCentroidConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &ResampledCentroidConfig {
        &self.config
    }

    /// Centroid delta of one control section
    pub fn section_delta(&self, scene: &AlignmentScene<'_>, section: usize) -> Result<Point2D> {
        let cv = scene.measured.convex.section(section)?;
        let cc = scene.measured.concave.section(section)?.reversed();
        let tcv = scene.templates.convex.section(section)?;
        let tcc = scene.templates.concave.section(section)?;

        let start = tcv.first().ok_or(Error::EmptySection { section })?.x;
        let end = tcc.last().ok_or(Error::EmptySection { section })?.x;
        let step = self.config.resample_step;
        let kind = scene.stock.kind;

        let mut cv_grid = Interpolant::fit(cv.xs(), cv.ys(), kind, Extrapolation::Extend)?
            .sample_step(start, end, step)?;
        let cc_grid = Interpolant::fit(cc.xs(), cc.ys(), kind, Extrapolation::Extend)?
            .sample_step(start, end, step)?;
        if let (Some(a), Some(b)) = (cv_grid.first(), cc_grid.first())
            && a.y < b.y
        {
            cv_grid.drain(..cv_grid.len().min(2));
        }

        let measured = centroid_of(cv_grid.into_iter().chain(cc_grid))
            .ok_or(Error::EmptyOverlap { section })?;
        let template = centroid_of(
            tcv.clipped_x(start, end)
                .iter()
                .chain(tcc.clipped_x(start, end).iter()),
        )
        .ok_or(Error::EmptyOverlap { section })?;
        Ok(template - measured)
    }

    /// Objective and block flag with the control sections shifted by `offset`.
    fn probe(
        &self,
        scene: &AlignmentScene<'_>,
        control: &SidePair<Profile>,
        axis: Axis,
        offset: f64,
    ) -> Result<Probe> {
        let (dx, dy) = match axis {
            Axis::X => (offset, 0.0),
            Axis::Y => (0.0, offset),
        };
        let shifted = control.as_ref().map(|p| p.translated(dx, dy));
        let stock = SidePair::new(
            control_stock(
                &shifted.convex,
                &scene.templates.convex,
                scene.control_sections,
                scene.stock,
            )?,
            control_stock(
                &shifted.concave,
                &scene.templates.concave,
                scene.control_sections,
                scene.stock,
            )?,
        );
        Ok(Probe {
            value: mean_control_stock(&stock),
            blocked: self.config.scrap.is_scraped(&stock),
        })
    }

    /// Hill-climb offset along `axis`, choosing the better direction.
    pub fn refine_axis(&self, scene: &AlignmentScene<'_>, axis: Axis) -> Result<f64> {
        let control = scene
            .measured
            .as_ref()
            .try_map(|p| p.subset(scene.control_sections))?;
        let baseline = self.probe(scene, &control, axis, 0.0)?.value;
        let step = self.config.hill_step;
        let max_steps = self.config.max_steps();

        let plus = hill_climb(baseline, step, max_steps, |offset| {
            self.probe(scene, &control, axis, offset)
        })?;
        let minus = hill_climb(baseline, -step, max_steps, |offset| {
            self.probe(scene, &control, axis, offset)
        })?;
        debug!("[Resampled] axis {axis}: plus={plus:.3} minus={minus:.3}");
        Ok(if plus > minus.abs() { plus } else { minus })
    }
}

impl BestFit for ResampledCentroidFit {
    fn best_fit(&self, scene: &AlignmentScene<'_>) -> Result<ShiftCorrection> {
        if scene.control_sections.is_empty() {
            return Err(Error::InvalidParameter(
                "best fit needs at least one control section".to_string(),
            ));
        }
        let deltas = scene
            .control_sections
            .iter()
            .map(|&s| self.section_delta(scene, s))
            .collect::<Result<Vec<_>>>()?;
        let mean = centroid_of(deltas.iter().copied()).ok_or(Error::EmptyCandidates)?;

        let extra_x = self.refine_axis(scene, Axis::X)?;
        let extra_y = self.refine_axis(scene, Axis::Y)?;
        let shift = ShiftCorrection::new(mean.x + extra_x, mean.y + extra_y)
            .finite()?
            .clamped(self.config.shift_limit);
        debug!(
            "[Resampled] mean delta=({:.4}, {:.4}) extra=({extra_x:.3}, {extra_y:.3}) shift=({:.3}, {:.3})",
            mean.x, mean.y, shift.dx, shift.dy
        );
        Ok(shift)
    }

    fn name(&self) -> &str {
        "resampled"
    }

    fn shift_limit(&self) -> f64 {
        self.config.shift_limit
    }
}
