//! Planar point type for section coordinates (millimetres).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in the section plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate (chord direction)
    pub x: f64,
    /// Y coordinate (thickness direction)
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Point at a polar offset from this one.
    ///
    /// `angle_deg` is measured CCW from +X, in degrees.
    #[inline]
    pub fn offset_polar(&self, angle_deg: f64, distance: f64) -> Point2D {
        let angle = angle_deg.to_radians();
        Point2D::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Rotate around the origin by `angle_deg` degrees (CCW)
    #[inline]
    pub fn rotate(&self, angle_deg: f64) -> Point2D {
        let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
        Point2D::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// True when both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_between_section_points() {
        let leading = Point2D::new(-7.5, 5.0);
        let probe = Point2D::new(-7.2, 5.4);
        assert_relative_eq!(leading.distance(&probe), 0.5, epsilon = 1e-12);
        assert_relative_eq!(probe.distance_squared(&leading), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_polar() {
        let p = Point2D::new(1.0, 1.0).offset_polar(90.0, 2.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_roundtrip() {
        let p = Point2D::new(2.5, -1.25);
        let back = p.rotate(17.0).rotate(-17.0);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
    }
}
