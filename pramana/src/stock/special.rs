//! Anomaly-aware stock for special regions.
//!
//! A localized bump on one side skews the generic calculation. The first
//! pass computes per-section means over the check sections on the full
//! chord. If any mean exceeds the anomaly threshold the three-zone
//! aggregation runs on the full chord (when `check_anomaly` is set).
//! Otherwise measured and template curves are first restricted to the
//! width range.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::calculator::StockParams;
use super::control::control_stock;
use super::zones::{AreaStock, Zone, ZoneMeans, aggregate_zones};
use crate::core::Profile;
use crate::error::{Error, Result};

/// Parameters of the special-region calculator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialRegionParams {
    /// Chordwise range `[start, end]` used when no anomaly is found
    pub width_range: (f64, f64),
    /// Section mean above which the first pass flags an anomaly
    pub anomaly_threshold: f64,
    /// Whether a detected anomaly switches to the full chord
    pub check_anomaly: bool,
}

impl Default for SpecialRegionParams {
    fn default() -> Self {
        Self {
            width_range: (-2.0, 2.0),
            anomaly_threshold: 0.1,
            check_anomaly: true,
        }
    }
}

impl SpecialRegionParams {
    /// Check that the width range is ordered and finite
    pub fn validate(&self) -> Result<()> {
        let (start, end) = self.width_range;
        if !(start.is_finite() && end.is_finite()) || start > end {
            return Err(Error::InvalidParameter(format!(
                "special width range [{start}, {end}] is not an ordered interval"
            )));
        }
        Ok(())
    }
}

/// Result of the special-region calculator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialStock {
    /// First pass found a section mean above the threshold
    pub anomaly_detected: bool,
    /// The aggregation ran on the full chord
    pub full_domain: bool,
    /// Three-zone stock (tip, mid, root)
    pub stock: AreaStock,
}

impl SpecialStock {
    /// Per-zone aggregate (zones 1..3)
    pub fn means(&self) -> ZoneMeans {
        self.stock.means()
    }
}

/// Three-zone stock with anomaly detection.
pub fn special_stock(
    measured: &Profile,
    template: &Profile,
    sections: &[usize],
    check_sections: &[usize],
    region: &SpecialRegionParams,
    params: &StockParams,
) -> Result<SpecialStock> {
    region.validate()?;

    // Compared unrounded: a mean of 0.1003 must still trip a 0.1 threshold
    let first_pass = control_stock(measured, template, check_sections, params)?;
    let anomaly_detected = first_pass
        .sections
        .iter()
        .filter_map(|&s| first_pass.matrix.row_raw_mean(s))
        .any(|m| m > region.anomaly_threshold);
    if anomaly_detected {
        warn!(
            "[Special] {} side: section mean above {} on the full chord, bump suspected",
            measured.side(),
            region.anomaly_threshold
        );
    }

    // Only the non-anomalous path narrows the chord
    let full_domain = anomaly_detected && region.check_anomaly;
    let stock = if full_domain {
        aggregate_zones(measured, template, &Zone::SPECIAL, sections, params, 0.0)?
    } else {
        let (start, end) = region.width_range;
        aggregate_zones(
            &measured.clipped_x(start, end),
            &template.clipped_x(start, end),
            &Zone::SPECIAL,
            sections,
            params,
            0.0,
        )?
    };
    debug!(
        "[Special] {} side: full_domain={} means={:?}",
        measured.side(),
        full_domain,
        stock.means()
    );

    Ok(SpecialStock {
        anomaly_detected,
        full_domain,
        stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point2D, SectionCurve, Side};
    use crate::geometry::InterpolationKind;

    /// Flat convex sections on a 0.1 mm grid over `x in [0, 4]`.
    fn flat(y: f64, x_range: std::ops::RangeInclusive<usize>) -> Profile {
        Profile::from_sections(
            Side::Convex,
            (0..9).map(|s| {
                let curve = SectionCurve::from_points(
                    x_range.clone().map(|i| Point2D::new(i as f64 * 0.1, y)),
                );
                (s, curve)
            }),
        )
    }

    #[test]
    fn test_mean_just_above_threshold_is_anomaly() {
        let template = flat(0.0, 0..=40);
        // Interior points only, so every window resamples onto template abscissae
        let measured = flat(0.1003, 10..=30);
        let params = StockParams::new(5, 11, InterpolationKind::Linear);
        let sections: Vec<usize> = (0..9).collect();

        let first = control_stock(&measured, &template, &sections, &params).unwrap();
        assert_eq!(first.means[0], Some(0.1));
        assert!(first.matrix.row_raw_mean(0).unwrap() > 0.1);

        let result = special_stock(
            &measured,
            &template,
            &sections,
            &sections,
            &SpecialRegionParams::default(),
            &params,
        )
        .unwrap();
        assert!(result.anomaly_detected);
        assert!(result.full_domain);
    }

    #[test]
    fn test_mean_below_threshold_narrows_chord() {
        let template = flat(0.0, 0..=40);
        let measured = flat(0.0997, 10..=30);
        let params = StockParams::new(5, 11, InterpolationKind::Linear);
        let sections: Vec<usize> = (0..9).collect();

        let result = special_stock(
            &measured,
            &template,
            &sections,
            &sections,
            &SpecialRegionParams {
                width_range: (1.5, 2.5),
                ..SpecialRegionParams::default()
            },
            &params,
        )
        .unwrap();
        assert!(!result.anomaly_detected);
        assert!(!result.full_domain);
    }

    #[test]
    fn test_validate_range() {
        let mut p = SpecialRegionParams::default();
        assert!(p.validate().is_ok());
        p.width_range = (1.0, -1.0);
        assert!(p.validate().is_err());
    }
}
