//! Distance sensing
//!
//! - [`distance`]: raw millimeter readings to calibrated inches
//! - [`telemetry`]: periodic calibrated-distance report for the operator

pub mod distance;
pub mod telemetry;

pub use distance::{
    correction_factor, mm_to_in, normalize, sort_distance_in, RawDistances, WallDistances,
    MM_PER_INCH,
};
pub use telemetry::{DistanceReport, DistanceTelemetry};
