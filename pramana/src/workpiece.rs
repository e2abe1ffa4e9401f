//! Per-cycle measurement session.
//!
//! A [`Workpiece`] owns the template pair, the calibrated measurement and the
//! alignment applied to it. Every operation an orchestration layer needs
//! during one measuring cycle is a method here.
//!
//! # Cycle
//!
//! ```text
//!   raw scan + calibration vectors
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ prepare_measurement │  rotate (tilt C), add vectors, filter convex y
//! └──────────┬──────────┘
//!            │  snapshot kept for reset()
//!            ▼
//! ┌─────────────────────┐
//! │  scrap / no-stock   │  control-section checks
//! └──────────┬──────────┘
//!            ▼
//! ┌─────────────────────┐
//! │   apply_best_fit    │  strategy A or B, rounded shift
//! └──────────┬──────────┘
//!            ▼
//!     area / special stock, C2
//! ```

use log::{debug, info, warn};

use crate::alignment::{
    AlignmentOp, AlignmentScene, AlignmentState, Axis, BestFit, BestFitMethod, BorderTrimFit,
    ResampledCentroidFit, ScrapFinding, ShiftCorrection, mean_control_stock, no_stock,
};
use crate::c2::{C2Measurement, measure_c2};
use crate::calibration::{CalibrationVectors, prepare_measurement};
use crate::config::PramanaConfig;
use crate::core::{Profile, SidePair};
use crate::error::Result;
use crate::stock::{
    AreaStock, ControlStock, SpecialStock, StockParams, area_stock_pair, control_stock,
    special_stock,
};

/// Measured and template profile pairs plus the alignment between them.
#[derive(Clone, Debug)]
pub struct Workpiece {
    config: PramanaConfig,
    stock_params: StockParams,
    templates: SidePair<Profile>,
    calibrated: SidePair<Profile>,
    measured: SidePair<Profile>,
    state: AlignmentState,
}

impl Workpiece {
    /// Start a session on an already calibrated measurement.
    pub fn new(
        config: PramanaConfig,
        templates: SidePair<Profile>,
        measured: SidePair<Profile>,
    ) -> Result<Self> {
        config.validate()?;
        templates.check_sides()?;
        measured.check_sides()?;
        let stock_params = config.stock_params();
        Ok(Self {
            config,
            stock_params,
            templates,
            calibrated: measured.clone(),
            measured,
            state: AlignmentState::default(),
        })
    }

    /// Start a session on a raw scan, applying calibration first.
    pub fn from_raw(
        config: PramanaConfig,
        templates: SidePair<Profile>,
        raw: &SidePair<Profile>,
        vectors: &CalibrationVectors,
    ) -> Result<Self> {
        let filter = config.measurement_filter();
        let measured = prepare_measurement(
            raw,
            vectors,
            config.additional_calibration(),
            config.profile.section_pitch,
            Some(&filter),
        )?;
        Self::new(config, templates, measured)
    }

    /// Session configuration
    pub fn config(&self) -> &PramanaConfig {
        &self.config
    }

    /// Template pair
    pub fn templates(&self) -> &SidePair<Profile> {
        &self.templates
    }

    /// Measured pair in its current position
    pub fn measured(&self) -> &SidePair<Profile> {
        &self.measured
    }

    /// Accumulated alignment
    pub fn state(&self) -> &AlignmentState {
        &self.state
    }

    /// Apply one rigid operator to both measured sides.
    pub fn apply(&mut self, op: AlignmentOp) {
        let pitch = self.config.profile.section_pitch;
        self.measured = op.apply_pair(&self.measured, &self.state, pitch);
        self.state.record(op);
        debug!("[Workpiece] applied {op:?}, state {:?}", self.state);
    }

    /// Translate along `axis`
    pub fn shift(&mut self, axis: Axis, value: f64) {
        self.apply(AlignmentOp::Shift { axis, value });
    }

    /// Tilt the section stack in y
    pub fn rotate_a(&mut self, deg: f64) {
        self.apply(AlignmentOp::RotateA(deg));
    }

    /// Tilt the section stack in x
    pub fn rotate_b(&mut self, deg: f64) {
        self.apply(AlignmentOp::RotateB(deg));
    }

    /// Rotate in the section plane
    pub fn rotate_c(&mut self, deg: f64) {
        self.apply(AlignmentOp::RotateC(deg));
    }

    /// Drop all alignment and restore the calibrated measurement.
    pub fn reset(&mut self) {
        self.measured = self.calibrated.clone();
        self.state = AlignmentState::default();
    }

    /// Stock on every control section, both sides
    pub fn control_stock(&self) -> Result<SidePair<ControlStock>> {
        let sections = self.config.control_sections();
        let (convex, concave) = self.config.execution().join(
            || {
                control_stock(
                    &self.measured.convex,
                    &self.templates.convex,
                    sections,
                    &self.stock_params,
                )
            },
            || {
                control_stock(
                    &self.measured.concave,
                    &self.templates.concave,
                    sections,
                    &self.stock_params,
                )
            },
        );
        Ok(SidePair::new(convex?, concave?))
    }

    /// Six-zone area stock of both sides
    pub fn area_stock(&self) -> Result<SidePair<AreaStock>> {
        area_stock_pair(
            &self.measured,
            &self.templates,
            &self.config.area_sections(),
            &self.stock_params,
            self.config.stock.edge_split_x,
            self.config.execution(),
        )
    }

    /// Anomaly-aware three-zone stock of the convex side
    pub fn special_stock(&self) -> Result<SpecialStock> {
        let sections = self.config.special_sections();
        special_stock(
            &self.measured.convex,
            &self.templates.convex,
            &sections,
            &sections,
            &self.config.special_params(),
            &self.stock_params,
        )
    }

    /// Correction proposed by the configured strategy, not applied
    pub fn best_fit(&self) -> Result<ShiftCorrection> {
        let strategy: Box<dyn BestFit> = match self.config.best_fit.method {
            BestFitMethod::BorderTrim => {
                Box::new(BorderTrimFit::new(self.config.border_trim_config()))
            }
            BestFitMethod::Resampled => {
                Box::new(ResampledCentroidFit::new(self.config.resampled_config()))
            }
        };
        let scene = AlignmentScene {
            measured: &self.measured,
            templates: &self.templates,
            control_sections: self.config.control_sections(),
            stock: &self.stock_params,
        };
        let correction = strategy.best_fit(&scene)?;
        info!(
            "[BestFit] {}: dx={:.4} dy={:.4}",
            strategy.name(),
            correction.dx,
            correction.dy
        );
        Ok(correction)
    }

    /// Run the best fit and apply the rounded correction as a shift.
    pub fn apply_best_fit(&mut self) -> Result<ShiftCorrection> {
        let correction = self.best_fit()?.rounded(self.config.best_fit.round_decimals);
        self.shift(Axis::X, correction.dx);
        self.shift(Axis::Y, correction.dy);
        Ok(correction)
    }

    /// C2 on every control section
    pub fn c2(&self) -> Result<Vec<C2Measurement>> {
        let params = self.config.c2_params()?;
        measure_c2(&self.measured, self.config.control_sections(), &params)
    }

    /// C2 results below nominal by more than the configured tolerance
    pub fn c2_defects(&self) -> Result<Vec<C2Measurement>> {
        let tolerance = self.config.profile.c2.tolerance;
        let defects: Vec<_> = self
            .c2()?
            .into_iter()
            .filter(|m| m.is_defective() && m.exceeds_tolerance(tolerance))
            .collect();
        for m in &defects {
            warn!(
                "[C2] section {}: {:.3} below nominal {:.3}",
                m.section,
                m.reported(),
                m.nominal
            );
        }
        Ok(defects)
    }

    /// Mean control stock over both sides, `None` if any section has no value
    pub fn mean_control_stock(&self) -> Result<Option<f64>> {
        Ok(mean_control_stock(&self.control_stock()?))
    }

    /// No control section position has enough stock left
    pub fn no_stock(&self) -> Result<bool> {
        let exhausted = no_stock(&self.control_stock()?, self.config.checks.no_stock_threshold);
        if exhausted {
            info!("[Checks] no stock left on any control section");
        }
        Ok(exhausted)
    }

    /// Scrap findings per side
    pub fn scrap_check(&self) -> Result<SidePair<Option<ScrapFinding>>> {
        let findings = self.config.scrap_check().check_pair(&self.control_stock()?);
        for f in [&findings.convex, &findings.concave].into_iter().flatten() {
            warn!(
                "[Checks] {} side scraped at section {}: {} points below threshold",
                f.side,
                f.section,
                f.bad_values.len()
            );
        }
        Ok(findings)
    }
}
