//! Zone partitioning and per-zone stock aggregation.
//!
//! Sections are split into three bands by position in the section list.
//! Area mode splits every band again at `edge_split_x`:
//!
//! | Zone | Band | Points |
//! |------|------|--------|
//! | 1 | tip (last third) | x <= split |
//! | 2 | tip | x > split |
//! | 3 | mid | x <= split |
//! | 4 | mid | x > split |
//! | 5 | root (first third) | x <= split |
//! | 6 | root | x > split |
//!
//! Special-region mode uses zones 1..3 = tip, mid, root without the split.
//! The split applies to both measured and template curves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::calculator::{StockParams, compute_stock};
use super::executor::ExecutionMode;
use crate::core::{Profile, SectionCurve, SidePair, StockMatrix};
use crate::error::{Error, Result};

/// Rounded mean per zone id (`None` when the zone has no values).
pub type ZoneMeans = BTreeMap<usize, Option<f64>>;

/// Spanwise band of sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// Last third of the section list
    Tip,
    /// Middle of the section list
    Mid,
    /// First third of the section list
    Root,
}

impl Band {
    /// Sections of this band.
    ///
    /// The root takes `len / 3` sections and the tip `ceil(len / 3)`, so a
    /// remainder lands in the tip band first. Two sections split into one
    /// mid and one tip section; a single section is tip only.
    pub fn sections(self, sections: &[usize]) -> &[usize] {
        let len = sections.len();
        let root = len / 3;
        let tip_start = len - len.div_ceil(3);
        match self {
            Band::Root => &sections[..root],
            Band::Mid => &sections[root..tip_start],
            Band::Tip => &sections[tip_start..],
        }
    }
}

/// Chordwise region relative to the edge split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRegion {
    /// x <= split
    Leading,
    /// x > split
    Trailing,
}

/// An aggregation zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    /// Zone id (1-based)
    pub id: usize,
    /// Spanwise band
    pub band: Band,
    /// Chordwise region, `None` for the whole chord
    pub region: Option<EdgeRegion>,
}

impl Zone {
    const fn new(id: usize, band: Band, region: Option<EdgeRegion>) -> Self {
        Self { id, band, region }
    }

    /// The six area zones
    pub const AREA: [Zone; 6] = [
        Zone::new(1, Band::Tip, Some(EdgeRegion::Leading)),
        Zone::new(2, Band::Tip, Some(EdgeRegion::Trailing)),
        Zone::new(3, Band::Mid, Some(EdgeRegion::Leading)),
        Zone::new(4, Band::Mid, Some(EdgeRegion::Trailing)),
        Zone::new(5, Band::Root, Some(EdgeRegion::Leading)),
        Zone::new(6, Band::Root, Some(EdgeRegion::Trailing)),
    ];

    /// The three special-region zones
    pub const SPECIAL: [Zone; 3] = [
        Zone::new(1, Band::Tip, None),
        Zone::new(2, Band::Mid, None),
        Zone::new(3, Band::Root, None),
    ];

    /// Restrict a curve to this zone's chordwise region
    pub fn clip(&self, curve: &SectionCurve, edge_split_x: f64) -> SectionCurve {
        match self.region {
            None => curve.clone(),
            Some(EdgeRegion::Leading) => curve.filtered(|p| p.x <= edge_split_x),
            Some(EdgeRegion::Trailing) => curve.filtered(|p| p.x > edge_split_x),
        }
    }
}

/// Stock of one zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneStock {
    /// The zone
    pub zone: Zone,
    /// Stock per section of the zone
    pub matrix: StockMatrix,
    /// Rounded mean of the matrix
    pub mean: Option<f64>,
}

/// Zone stock of one side over a section range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaStock {
    /// Per-zone results in zone id order
    pub zones: Vec<ZoneStock>,
}

impl AreaStock {
    /// Zone result by id
    pub fn zone(&self, id: usize) -> Option<&ZoneStock> {
        self.zones.iter().find(|z| z.zone.id == id)
    }

    /// Per-zone aggregate
    pub fn means(&self) -> ZoneMeans {
        self.zones.iter().map(|z| (z.zone.id, z.mean)).collect()
    }
}

/// Stock of one zone.
pub fn zone_stock(
    measured: &Profile,
    template: &Profile,
    zone: Zone,
    sections: &[usize],
    params: &StockParams,
    edge_split_x: f64,
) -> Result<ZoneStock> {
    if measured.side() != template.side() {
        return Err(Error::WrongSide {
            expected: measured.side(),
            found: template.side(),
        });
    }
    let mut matrix = StockMatrix::new();
    for &section in zone.band.sections(sections) {
        let m = zone.clip(measured.section(section)?, edge_split_x);
        let t = zone.clip(template.section(section)?, edge_split_x);
        matrix.insert(section, compute_stock(&m, &t, measured.side(), params)?);
    }
    let mean = matrix.mean();
    Ok(ZoneStock { zone, matrix, mean })
}

/// Stock of a list of zones over `sections`.
pub fn aggregate_zones(
    measured: &Profile,
    template: &Profile,
    zones: &[Zone],
    sections: &[usize],
    params: &StockParams,
    edge_split_x: f64,
) -> Result<AreaStock> {
    let zones = zones
        .iter()
        .map(|&zone| zone_stock(measured, template, zone, sections, params, edge_split_x))
        .collect::<Result<Vec<_>>>()?;
    Ok(AreaStock { zones })
}

/// Six-zone area stock of one side.
pub fn area_stock(
    measured: &Profile,
    template: &Profile,
    sections: &[usize],
    params: &StockParams,
    edge_split_x: f64,
) -> Result<AreaStock> {
    aggregate_zones(
        measured,
        template,
        &Zone::AREA,
        sections,
        params,
        edge_split_x,
    )
}

/// Six-zone area stock of both sides.
///
/// The two sides are independent; `mode` only decides whether they run on
/// the caller's thread or as a two-way parallel join.
pub fn area_stock_pair(
    measured: &SidePair<Profile>,
    templates: &SidePair<Profile>,
    sections: &[usize],
    params: &StockParams,
    edge_split_x: f64,
    mode: ExecutionMode,
) -> Result<SidePair<AreaStock>> {
    let (convex, concave) = mode.join(
        || area_stock(&measured.convex, &templates.convex, sections, params, edge_split_x),
        || area_stock(&measured.concave, &templates.concave, sections, params, edge_split_x),
    );
    Ok(SidePair::new(convex?, concave?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thirds() {
        let sections: Vec<usize> = (10..19).collect();
        assert_eq!(Band::Root.sections(&sections), &[10, 11, 12]);
        assert_eq!(Band::Mid.sections(&sections), &[13, 14, 15]);
        assert_eq!(Band::Tip.sections(&sections), &[16, 17, 18]);
    }

    #[test]
    fn test_band_remainder_goes_to_tip() {
        let sections: Vec<usize> = (0..11).collect();
        assert_eq!(Band::Root.sections(&sections).len(), 3);
        assert_eq!(Band::Mid.sections(&sections).len(), 4);
        assert_eq!(Band::Tip.sections(&sections).len(), 4);

        let sections: Vec<usize> = (0..10).collect();
        assert_eq!(Band::Root.sections(&sections).len(), 3);
        assert_eq!(Band::Mid.sections(&sections).len(), 3);
        assert_eq!(Band::Tip.sections(&sections).len(), 4);
    }

    #[test]
    fn test_default_area_bands() {
        let sections: Vec<usize> = (113..342).collect();
        let root = Band::Root.sections(&sections);
        let mid = Band::Mid.sections(&sections);
        let tip = Band::Tip.sections(&sections);
        assert_eq!((root.len(), mid.len(), tip.len()), (76, 76, 77));
        assert_eq!(mid.first(), Some(&189));
        assert_eq!(tip.first(), Some(&265));
    }

    #[test]
    fn test_short_section_list() {
        let sections = [4, 5];
        assert!(Band::Root.sections(&sections).is_empty());
        assert_eq!(Band::Mid.sections(&sections), &[4]);
        assert_eq!(Band::Tip.sections(&sections), &[5]);

        let single = [7];
        assert!(Band::Root.sections(&single).is_empty());
        assert!(Band::Mid.sections(&single).is_empty());
        assert_eq!(Band::Tip.sections(&single), &[7]);

        for band in [Band::Root, Band::Mid, Band::Tip] {
            assert!(band.sections(&[]).is_empty());
        }
    }

    #[test]
    fn test_zone_clip() {
        let curve = SectionCurve::new(vec![0.0, 1.0, 1.5, 2.0], vec![0.0; 4]).unwrap();
        assert_eq!(Zone::AREA[0].clip(&curve, 1.0).xs(), &[0.0, 1.0]);
        assert_eq!(Zone::AREA[1].clip(&curve, 1.0).xs(), &[1.5, 2.0]);
        assert_eq!(Zone::SPECIAL[0].clip(&curve, 1.0).len(), 4);
    }

    #[test]
    fn test_zone_ids() {
        for (i, z) in Zone::AREA.iter().enumerate() {
            assert_eq!(z.id, i + 1);
            let leading = z.id % 2 == 1;
            assert_eq!(z.region == Some(EdgeRegion::Leading), leading);
        }
    }
}
