//! Nearest-point search.
//!
//! Brute force O(n). Candidate sets are small (a resampled window or one
//! section curve), so no spatial index is used.

use crate::core::Point2D;
use crate::error::{Error, Result};

/// Result of a nearest-point query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Index of the closest candidate in iteration order
    pub index: usize,
    /// The closest candidate
    pub point: Point2D,
    /// Euclidean distance from the query
    pub distance: f64,
}

/// Find the candidate closest to `query`.
///
/// The first minimum in iteration order wins. Fails with
/// [`Error::EmptyCandidates`] if there are no candidates.
pub fn nearest<I>(query: Point2D, candidates: I) -> Result<Nearest>
where
    I: IntoIterator<Item = Point2D>,
{
    let mut best: Option<(usize, Point2D, f64)> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let d2 = query.distance_squared(&candidate);
        if best.is_none_or(|(_, _, best_d2)| d2 < best_d2) {
            best = Some((index, candidate, d2));
        }
    }
    let (index, point, d2) = best.ok_or(Error::EmptyCandidates)?;
    Ok(Nearest {
        index,
        point,
        distance: d2.sqrt(),
    })
}

/// Candidate point closest to `query`.
pub fn closest_point(query: Point2D, candidates: &[Point2D]) -> Result<Point2D> {
    nearest(query, candidates.iter().copied()).map(|n| n.point)
}
