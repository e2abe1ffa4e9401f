//! Default value functions for serde deserialization.

use crate::geometry::InterpolationKind;

pub fn spline_borders() -> usize {
    5
}

pub fn spline_points() -> usize {
    50
}

pub fn spline_kind() -> InterpolationKind {
    InterpolationKind::Cubic
}

pub fn stock_clamp() -> f64 {
    0.8
}

pub fn edge_split_x() -> f64 {
    1.0
}

pub fn area_sections() -> (usize, usize) {
    (113, 342)
}

pub fn width_range() -> (f64, f64) {
    (-2.0, 2.0)
}

pub fn anomaly_threshold() -> f64 {
    0.1
}

pub fn enabled() -> bool {
    true
}

pub fn shift_limit() -> f64 {
    0.1
}

pub fn hill_step() -> f64 {
    0.01
}

pub fn resample_step() -> f64 {
    0.01
}

pub fn convex_y_limit() -> f64 {
    4.0
}

pub fn x_bias() -> f64 {
    -0.1
}

pub fn y_bias() -> f64 {
    0.06
}

pub fn negative_y_damping() -> f64 {
    0.6
}

pub fn round_decimals() -> i32 {
    2
}

pub fn scrap_threshold() -> f64 {
    -0.08
}

pub fn scrap_points() -> usize {
    8
}

pub fn no_stock_threshold() -> f64 {
    0.1
}

pub fn control_sections() -> Vec<usize> {
    vec![121, 221, 321, 341]
}

pub fn section_pitch() -> f64 {
    0.1
}

pub fn c2_alpha() -> Vec<f64> {
    vec![-0.45, 6.28, 16.45, 18.46]
}

pub fn c2_gamma2() -> Vec<f64> {
    vec![49.22, 51.57, 58.04, 59.44]
}

pub fn c2_b2() -> Vec<f64> {
    vec![7.31, 7.01, 6.45, 6.33]
}

pub fn c2_nominal() -> Vec<f64> {
    vec![0.51, 0.44, 0.40, 0.38]
}

pub fn c2_y2() -> Vec<f64> {
    vec![2.942, 3.402, 3.913, 4.019]
}

pub fn c2_r2() -> Vec<f64> {
    vec![0.15, 0.156, 0.157, 0.150]
}

pub fn c2_tolerance() -> f64 {
    0.12
}

pub fn c2_position() -> f64 {
    1.0
}

pub fn c2_angle_offset() -> f64 {
    13.0
}

pub fn calibration_sections() -> (usize, usize) {
    (150, 300)
}

pub fn reference_area_code() -> i32 {
    101
}

pub fn convex_y_filter() -> f64 {
    3.0
}

pub fn filter_area_codes() -> Vec<i32> {
    vec![1, 2]
}
