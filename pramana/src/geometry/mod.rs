//! Geometry primitives shared by the stock and alignment code.
//!
//! - [`nearest`]: brute-force closest point search
//! - [`Interpolant`]: local B-spline interpolation (linear/quadratic/cubic)
//! - [`solve_dense`] / [`fit_line`]: small linear algebra helpers

mod linalg;
mod nearest;
mod spline;

pub use linalg::{fit_line, solve_dense};
pub use nearest::{Nearest, closest_point, nearest};
pub use spline::{
    Extrapolation, InterpolationKind, Interpolant, arange, linspace, local_interpolate,
};
