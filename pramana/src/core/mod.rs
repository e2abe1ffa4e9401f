//! Core data types: points, section curves, profiles and stock matrices.

mod curve;
mod point;
mod profile;
mod stock;

pub use curve::{SectionCurve, centroid_of};
pub use point::Point2D;
pub use profile::{Profile, ScanMetadata, Side, SidePair};
pub use stock::{StockMatrix, StockVector, mean_stock, raw_mean, round_to};
