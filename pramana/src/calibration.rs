//! Static offset calibration of measured profiles.
//!
//! Four per-section vectors (convex x/y, concave x/y) are added to raw
//! measured coordinates. They are produced by [`create_calibration_vectors`]
//! from a scan of the calibration master: the first point of every section
//! is regressed onto a straight line over a section range and subtracted
//! from the master's known position.
//!
//! [`AdditionalCalibration`] holds the per-side fine corrections applied on
//! top: an in-plane rotation, two stack tilts and constant shifts.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{Profile, Side, SidePair};
use crate::error::{Error, Result};
use crate::geometry::fit_line;

/// Per-section calibration offsets, indexed by section number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationVectors {
    /// Convex x offsets
    pub convex_x: Vec<f64>,
    /// Convex y offsets
    pub convex_y: Vec<f64>,
    /// Concave x offsets
    pub concave_x: Vec<f64>,
    /// Concave y offsets
    pub concave_y: Vec<f64>,
}

impl CalibrationVectors {
    /// All-zero vectors covering sections `0..len`
    pub fn zeros(len: usize) -> Self {
        Self {
            convex_x: vec![0.0; len],
            convex_y: vec![0.0; len],
            concave_x: vec![0.0; len],
            concave_y: vec![0.0; len],
        }
    }

    /// Number of sections covered by all four vectors
    pub fn len(&self) -> usize {
        self.convex_x
            .len()
            .min(self.convex_y.len())
            .min(self.concave_x.len())
            .min(self.concave_y.len())
    }

    /// True if no section is covered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy with tilts and constant shifts of `additional` folded in.
    ///
    /// Tilt A bends the y vectors and tilt B the x vectors:
    /// `v[n] += n * pitch * tan(angle)`.
    pub fn with_additional(&self, additional: &AdditionalCalibration, pitch: f64) -> Self {
        let adjust = |values: &[f64], tilt_deg: f64, shift: f64| -> Vec<f64> {
            tilt_offsets(values, tilt_deg, pitch)
                .into_iter()
                .map(|v| v + shift)
                .collect()
        };
        let cv = &additional.convex;
        let cc = &additional.concave;
        Self {
            convex_x: adjust(&self.convex_x, cv.tilt_b, cv.shift_x),
            convex_y: adjust(&self.convex_y, cv.tilt_a, cv.shift_y),
            concave_x: adjust(&self.concave_x, cc.tilt_b, cc.shift_x),
            concave_y: adjust(&self.concave_y, cc.tilt_a, cc.shift_y),
        }
    }

    /// Add the offsets of the profile's side to every section.
    pub fn apply(&self, profile: &Profile) -> Result<Profile> {
        let (xs, ys) = match profile.side() {
            Side::Convex => (&self.convex_x, &self.convex_y),
            Side::Concave => (&self.concave_x, &self.concave_y),
        };
        if let Some(section) = profile.section_indices().into_iter().find(|&s| s >= self.len()) {
            return Err(Error::CalibrationOutOfRange { section });
        }
        Ok(profile.map_sections(|s, curve| curve.translated(xs[s], ys[s])))
    }
}

/// Fine corrections for one side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideCalibration {
    /// Constant x shift (mm)
    pub shift_x: f64,
    /// Constant y shift (mm)
    pub shift_y: f64,
    /// Tilt applied to the y vector (degrees)
    pub tilt_a: f64,
    /// Tilt applied to the x vector (degrees)
    pub tilt_b: f64,
    /// In-plane rotation of the raw measurement (degrees)
    pub tilt_c: f64,
}

/// Fine corrections for both sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCalibration {
    /// Convex side
    #[serde(default = "default_convex")]
    pub convex: SideCalibration,
    /// Concave side
    #[serde(default = "default_concave")]
    pub concave: SideCalibration,
}

fn default_convex() -> SideCalibration {
    SideCalibration {
        shift_x: 0.3,
        shift_y: -0.06,
        tilt_a: -0.02,
        tilt_b: -0.02,
        tilt_c: 0.0,
    }
}

fn default_concave() -> SideCalibration {
    SideCalibration {
        shift_x: 15.07,
        shift_y: -0.09,
        tilt_a: 0.0,
        tilt_b: -0.2,
        tilt_c: 0.0,
    }
}

impl Default for AdditionalCalibration {
    fn default() -> Self {
        Self {
            convex: default_convex(),
            concave: default_concave(),
        }
    }
}

impl AdditionalCalibration {
    /// No correction on either side
    pub fn none() -> Self {
        Self {
            convex: SideCalibration::default(),
            concave: SideCalibration::default(),
        }
    }

    /// Corrections of `side`
    pub fn side(&self, side: Side) -> &SideCalibration {
        match side {
            Side::Convex => &self.convex,
            Side::Concave => &self.concave,
        }
    }
}

/// Measurement preparation options.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementFilter {
    /// Convex points with y above this are dropped (mm)
    pub convex_y_limit: f64,
    /// Area codes the limit applies to
    pub area_codes: Vec<i32>,
}

impl Default for MeasurementFilter {
    fn default() -> Self {
        Self {
            convex_y_limit: 3.0,
            area_codes: vec![1, 2],
        }
    }
}

/// Calibrate a raw measured pair.
///
/// Order: rotate each side by its `tilt_c`, add the calibration vectors with
/// `additional` folded in, then drop high convex points if `filter` applies
/// to the scan's area code.
pub fn prepare_measurement(
    raw: &SidePair<Profile>,
    vectors: &CalibrationVectors,
    additional: &AdditionalCalibration,
    pitch: f64,
    filter: Option<&MeasurementFilter>,
) -> Result<SidePair<Profile>> {
    raw.check_sides()?;
    let vectors = vectors.with_additional(additional, pitch);
    let mut prepared = raw
        .as_ref()
        .try_map(|p| vectors.apply(&p.rotated(additional.side(p.side()).tilt_c)))?;

    if let Some(filter) = filter {
        let area = prepared.convex.scan().map(|s| s.area_to_measure);
        if area.is_some_and(|code| filter.area_codes.contains(&code)) {
            let limit = filter.convex_y_limit;
            prepared.convex = prepared
                .convex
                .map_sections(|_, c| c.filtered(|p| p.y <= limit));
            debug!("[Calibration] convex points above y={limit} dropped for area {area:?}");
        }
    }
    Ok(prepared)
}

/// `values[n] + n * pitch * tan(angle)`
pub fn tilt_offsets(values: &[f64], angle_deg: f64, pitch: f64) -> Vec<f64> {
    let slope = angle_deg.to_radians().tan();
    values
        .iter()
        .enumerate()
        .map(|(n, v)| v + n as f64 * pitch * slope)
        .collect()
}

/// Reference position of the calibration master.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTargets {
    /// Expected convex first-point x (mm)
    pub convex_x: f64,
    /// Expected convex first-point y (mm)
    pub convex_y: f64,
    /// Expected concave first-point x (mm)
    pub concave_x: f64,
    /// Expected concave first-point y (mm)
    pub concave_y: f64,
    /// Area-to-measure code identifying a master scan
    pub reference_area_code: i32,
    /// Sections `[start, end)` used for the regression
    pub section_range: (usize, usize),
}

impl Default for CalibrationTargets {
    fn default() -> Self {
        Self {
            convex_x: -7.5,
            convex_y: 5.0,
            concave_x: -7.5,
            concave_y: -5.0,
            reference_area_code: 101,
            section_range: (150, 300),
        }
    }
}

/// First point coordinate of every section `0..len`, `None` where absent.
pub fn first_points(profile: &Profile, len: usize, y: bool) -> Vec<Option<f64>> {
    (0..len)
        .map(|s| {
            let p = profile.section(s).ok()?.first()?;
            Some(if y { p.y } else { p.x })
        })
        .collect()
}

/// Replace `values` by the least-squares line through the defined
/// entries in `range`, evaluated at every index.
pub fn straighten(values: &[Option<f64>], range: (usize, usize)) -> Result<Vec<f64>> {
    let (start, end) = range;
    let (xs, ys): (Vec<f64>, Vec<f64>) = (start..end.min(values.len()))
        .filter_map(|i| values[i].filter(|v| v.is_finite()).map(|v| (i as f64, v)))
        .unzip();
    let (slope, intercept) = fit_line(&xs, &ys).ok_or(Error::InsufficientCalibrationData {
        start,
        end,
        found: xs.len(),
    })?;
    info!("[Calibration] line fit k = {slope:.4}, b = {intercept:.4}");
    Ok((0..values.len())
        .map(|i| i as f64 * slope + intercept)
        .collect())
}

/// Build calibration vectors from a scan of the calibration master.
///
/// Fails with [`Error::WrongProfileKind`] unless the convex profile's scan
/// metadata carries `targets.reference_area_code`.
pub fn create_calibration_vectors(
    master: &SidePair<Profile>,
    targets: &CalibrationTargets,
) -> Result<CalibrationVectors> {
    master.check_sides()?;
    let found = master.convex.scan().map(|s| s.area_to_measure);
    if found != Some(targets.reference_area_code) {
        return Err(Error::WrongProfileKind {
            expected: targets.reference_area_code,
            found,
        });
    }

    let len = master
        .convex
        .section_indices()
        .into_iter()
        .chain(master.concave.section_indices())
        .max()
        .map_or(0, |s| s + 1);
    let range = targets.section_range;
    let vector = |profile: &Profile, y: bool, target: f64| -> Result<Vec<f64>> {
        Ok(straighten(&first_points(profile, len, y), range)?
            .into_iter()
            .map(|v| target - v)
            .collect())
    };

    Ok(CalibrationVectors {
        convex_x: vector(&master.convex, false, targets.convex_x)?,
        convex_y: vector(&master.convex, true, targets.convex_y)?,
        concave_x: vector(&master.concave, false, targets.concave_x)?,
        concave_y: vector(&master.concave, true, targets.concave_y)?,
    })
}
