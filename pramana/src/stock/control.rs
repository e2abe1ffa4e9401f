//! Stock over the canonical control sections, aggregated per section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::calculator::{StockParams, compute_stock};
use crate::core::{Profile, Side, StockMatrix};
use crate::error::{Error, Result};

/// Control-section stock of one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlStock {
    /// Surface side
    pub side: Side,
    /// Control sections in evaluation order
    pub sections: Vec<usize>,
    /// Stock per control section
    pub matrix: StockMatrix,
    /// Rounded mean per control section, aligned with `sections`
    pub means: Vec<Option<f64>>,
}

impl ControlStock {
    /// Mean of one control section
    pub fn section_mean(&self, section: usize) -> Option<f64> {
        self.sections
            .iter()
            .position(|&s| s == section)
            .and_then(|i| self.means[i])
    }

    /// Means keyed by 1-based position in the control list
    pub fn positional_means(&self) -> BTreeMap<usize, Option<f64>> {
        self.means
            .iter()
            .enumerate()
            .map(|(i, m)| (i + 1, *m))
            .collect()
    }
}

/// Run the stock calculator on each control section, without zone splitting.
pub fn control_stock(
    measured: &Profile,
    template: &Profile,
    sections: &[usize],
    params: &StockParams,
) -> Result<ControlStock> {
    if measured.side() != template.side() {
        return Err(Error::WrongSide {
            expected: measured.side(),
            found: template.side(),
        });
    }
    let mut matrix = StockMatrix::new();
    let mut means = Vec::with_capacity(sections.len());
    for &section in sections {
        let row = compute_stock(
            measured.section(section)?,
            template.section(section)?,
            measured.side(),
            params,
        )?;
        means.push(crate::core::mean_stock(row.iter().copied()));
        matrix.insert(section, row);
    }
    Ok(ControlStock {
        side: measured.side(),
        sections: sections.to_vec(),
        matrix,
        means,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point2D, SectionCurve};

    fn flat_profile(side: Side, y: f64, sections: &[usize]) -> Profile {
        let curve =
            SectionCurve::from_points((0..41).map(|i| Point2D::new(-2.0 + i as f64 * 0.1, y)));
        Profile::from_sections(side, sections.iter().map(|&s| (s, curve.clone())))
    }

    #[test]
    fn test_per_section_means() {
        let sections = [121, 221, 321];
        let template = flat_profile(Side::Convex, 0.0, &sections);
        let measured = flat_profile(Side::Convex, 0.2, &sections);
        let stock = control_stock(&measured, &template, &sections, &StockParams::default()).unwrap();
        assert_eq!(stock.means.len(), 3);
        for m in &stock.means {
            assert_eq!(*m, Some(0.2));
        }
        assert_eq!(stock.section_mean(221), Some(0.2));
        assert_eq!(stock.section_mean(999), None);
        assert_eq!(stock.positional_means().keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_control_section() {
        let template = flat_profile(Side::Concave, 0.0, &[121]);
        let measured = flat_profile(Side::Concave, 0.0, &[121, 221]);
        let err = control_stock(&measured, &template, &[121, 221], &StockParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingSection { section: 221, .. }));
    }
}
