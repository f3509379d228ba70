//! Distance normalization
//!
//! Converts a raw millimeter reading into the distance from the robot edge
//! to the wall, in inches:
//!
//! ```text
//! actual_in = raw_mm / 25.4 * sin(mount_angle) / sin(pi/2) + offset_in
//! ```
//!
//! Perpendicular sensors use a correction factor of 1. Out-of-range raw
//! values are not rejected here; a reading beyond the field simply fails
//! every wall-adjacency test downstream.

use core::f32::consts::FRAC_PI_2;

use libm::sinf;

use crate::parameters::{DistanceParams, SensorCalibration};

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert millimeters to inches
#[inline]
pub fn mm_to_in(mm: f32) -> f32 {
    mm / MM_PER_INCH
}

/// Multiplier that projects an angled reading onto the wall normal
pub fn correction_factor(calibration: &SensorCalibration) -> f32 {
    match calibration.mount_angle_rad {
        Some(angle) => sinf(angle) / sinf(FRAC_PI_2),
        None => 1.0,
    }
}

/// Calibrated distance in inches for one raw reading
pub fn normalize(raw_mm: f32, calibration: &SensorCalibration) -> f32 {
    mm_to_in(raw_mm) * correction_factor(calibration) + calibration.offset_in
}

/// Calibrated distance from the sort sensor, in inches
pub fn sort_distance_in(raw_mm: f32, params: &DistanceParams) -> f32 {
    normalize(raw_mm, &params.sort)
}

/// Raw readings from the distance sensors for one tick (millimeters)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawDistances {
    pub left_mm: f32,
    pub right_mm: f32,
    pub front_mm: f32,
    pub back_mm: f32,
}

/// Calibrated distances to the four walls (inches)
///
/// Recomputed from [`RawDistances`] every time it is needed; never cached
/// across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallDistances {
    pub left: f32,
    pub right: f32,
    pub front: f32,
    pub back: f32,
}

impl WallDistances {
    /// Normalize all four readings
    pub fn from_raw(raw: &RawDistances, params: &DistanceParams) -> Self {
        Self {
            left: normalize(raw.left_mm, &params.left),
            right: normalize(raw.right_mm, &params.right),
            front: normalize(raw.front_mm, &params.front),
            back: normalize(raw.back_mm, &params.back),
        }
    }
}
