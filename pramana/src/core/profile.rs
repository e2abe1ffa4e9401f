//! Profiles: a stack of section curves for one surface side.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::SectionCurve;
use crate::error::{Error, Result};

/// Surface orientation. Controls the stock sign convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Suction side
    Convex,
    /// Pressure side
    Concave,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Convex => write!(f, "convex"),
            Side::Concave => write!(f, "concave"),
        }
    }
}

/// Raw-scan metadata carried by measured profiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Scanner program identifier
    pub program_id: String,
    /// Area-to-measure code (1/2 tip areas, 101 calibration master, ...)
    pub area_to_measure: i32,
}

impl ScanMetadata {
    /// Create scan metadata
    pub fn new(program_id: impl Into<String>, area_to_measure: i32) -> Self {
        Self {
            program_id: program_id.into(),
            area_to_measure,
        }
    }
}

/// Mapping from section index to curve, tagged with a side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    side: Side,
    sections: BTreeMap<usize, SectionCurve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scan: Option<ScanMetadata>,
}

impl Profile {
    /// Create an empty profile
    pub fn new(side: Side) -> Self {
        Self {
            side,
            sections: BTreeMap::new(),
            scan: None,
        }
    }

    /// Create a profile from `(section, curve)` pairs
    pub fn from_sections<I>(side: Side, sections: I) -> Self
    where
        I: IntoIterator<Item = (usize, SectionCurve)>,
    {
        Self {
            side,
            sections: sections.into_iter().collect(),
            scan: None,
        }
    }

    /// Attach scan metadata
    pub fn with_scan(mut self, scan: ScanMetadata) -> Self {
        self.scan = Some(scan);
        self
    }

    /// Surface side
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Scan metadata, if this is a measured profile
    pub fn scan(&self) -> Option<&ScanMetadata> {
        self.scan.as_ref()
    }

    /// Curve for `section`
    pub fn section(&self, section: usize) -> Result<&SectionCurve> {
        self.sections.get(&section).ok_or(Error::MissingSection {
            side: self.side,
            section,
        })
    }

    /// Insert or replace a section curve
    pub fn insert(&mut self, section: usize, curve: SectionCurve) {
        self.sections.insert(section, curve);
    }

    /// Iterate over `(section, curve)` in ascending section order
    pub fn sections(&self) -> impl Iterator<Item = (usize, &SectionCurve)> {
        self.sections.iter().map(|(&k, v)| (k, v))
    }

    /// Section indices in ascending order
    pub fn section_indices(&self) -> Vec<usize> {
        self.sections.keys().copied().collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the profile has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Copy with `f` applied to every section curve
    pub fn map_sections<F>(&self, mut f: F) -> Profile
    where
        F: FnMut(usize, &SectionCurve) -> SectionCurve,
    {
        Profile {
            side: self.side,
            sections: self.sections.iter().map(|(&k, c)| (k, f(k, c))).collect(),
            scan: self.scan.clone(),
        }
    }

    /// Copy containing only `sections`, failing on any missing index
    pub fn subset(&self, sections: &[usize]) -> Result<Profile> {
        let mut out = Profile::new(self.side);
        out.scan = self.scan.clone();
        for &s in sections {
            out.insert(s, self.section(s)?.clone());
        }
        Ok(out)
    }

    /// Copy translated by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> Profile {
        self.map_sections(|_, c| c.translated(dx, dy))
    }

    /// Copy rotated around the origin by `angle_deg` degrees
    pub fn rotated(&self, angle_deg: f64) -> Profile {
        self.map_sections(|_, c| c.rotated(angle_deg))
    }

    /// Copy with every section clipped to `start <= x <= end`
    pub fn clipped_x(&self, start: f64, end: f64) -> Profile {
        self.map_sections(|_, c| c.clipped_x(start, end))
    }
}

/// A value held once per surface side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SidePair<T> {
    /// Convex side value
    pub convex: T,
    /// Concave side value
    pub concave: T,
}

impl<T> SidePair<T> {
    /// Create a pair
    pub fn new(convex: T, concave: T) -> Self {
        Self { convex, concave }
    }

    /// Value for `side`
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Convex => &self.convex,
            Side::Concave => &self.concave,
        }
    }

    /// Borrow both values
    pub fn as_ref(&self) -> SidePair<&T> {
        SidePair::new(&self.convex, &self.concave)
    }

    /// Apply `f` to both values
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> SidePair<U> {
        SidePair::new(f(self.convex), f(self.concave))
    }

    /// Apply a fallible `f` to both values
    pub fn try_map<U, F: FnMut(T) -> Result<U>>(self, mut f: F) -> Result<SidePair<U>> {
        Ok(SidePair::new(f(self.convex)?, f(self.concave)?))
    }
}

impl SidePair<Profile> {
    /// Check that each profile carries the side it is stored under
    pub fn check_sides(&self) -> Result<()> {
        for (expected, profile) in [(Side::Convex, &self.convex), (Side::Concave, &self.concave)] {
            if profile.side() != expected {
                return Err(Error::WrongSide {
                    expected,
                    found: profile.side(),
                });
            }
        }
        Ok(())
    }
}
