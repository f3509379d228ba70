//! Distance sensor calibration parameters
//!
//! Offsets are measured from each sensor face to the robot edge it looks
//! out of. The right and front sensors are mounted off-perpendicular and
//! read the hypotenuse; their mount angle turns that back into the
//! perpendicular distance to the wall.

use super::error::ParameterError;

/// Default left sensor offset (inches)
pub const DEFAULT_LEFT_OFFSET_IN: f32 = 6.0;
/// Default right sensor offset (inches)
pub const DEFAULT_RIGHT_OFFSET_IN: f32 = 5.5;
/// Default front sensor offset (inches)
pub const DEFAULT_FRONT_OFFSET_IN: f32 = 4.0;
/// Default back sensor offset (inches)
pub const DEFAULT_BACK_OFFSET_IN: f32 = 6.25;

/// Right sensor mount angle (radians from the robot side)
pub const DEFAULT_RIGHT_MOUNT_ANGLE_RAD: f32 = 1.51844;
/// Front sensor mount angle (radians from the robot front)
pub const DEFAULT_FRONT_MOUNT_ANGLE_RAD: f32 = 1.31472;

/// Calibration of one distance sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCalibration {
    /// Added to the converted reading (inches)
    pub offset_in: f32,
    /// Mount angle for trigonometric correction; `None` = perpendicular
    pub mount_angle_rad: Option<f32>,
}

impl SensorCalibration {
    /// Perpendicular sensor with a plain offset
    pub const fn direct(offset_in: f32) -> Self {
        Self {
            offset_in,
            mount_angle_rad: None,
        }
    }

    /// Angled sensor that needs trigonometric correction
    pub const fn angled(offset_in: f32, mount_angle_rad: f32) -> Self {
        Self {
            offset_in,
            mount_angle_rad: Some(mount_angle_rad),
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ParameterError> {
        if !self.offset_in.is_finite() {
            return Err(ParameterError::OutOfRange { name });
        }
        if let Some(angle) = self.mount_angle_rad {
            // sin() must stay positive or the correction flips sign
            if !(angle > 0.0 && angle < core::f32::consts::PI) {
                return Err(ParameterError::OutOfRange { name });
            }
        }
        Ok(())
    }
}

/// Calibration for all five distance sensors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceParams {
    pub left: SensorCalibration,
    pub right: SensorCalibration,
    pub front: SensorCalibration,
    pub back: SensorCalibration,
    /// Ejection proximity sensor, read without offset
    pub sort: SensorCalibration,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            left: SensorCalibration::direct(DEFAULT_LEFT_OFFSET_IN),
            right: SensorCalibration::angled(DEFAULT_RIGHT_OFFSET_IN, DEFAULT_RIGHT_MOUNT_ANGLE_RAD),
            front: SensorCalibration::angled(DEFAULT_FRONT_OFFSET_IN, DEFAULT_FRONT_MOUNT_ANGLE_RAD),
            back: SensorCalibration::direct(DEFAULT_BACK_OFFSET_IN),
            sort: SensorCalibration::direct(0.0),
        }
    }
}

impl DistanceParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.left.validate("DIST_LEFT")?;
        self.right.validate("DIST_RIGHT")?;
        self.front.validate("DIST_FRONT")?;
        self.back.validate("DIST_BACK")?;
        self.sort.validate("DIST_SORT")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration() {
        let params = DistanceParams::default();
        assert_eq!(params.left.mount_angle_rad, None);
        assert_eq!(params.back.mount_angle_rad, None);
        assert_eq!(params.right.mount_angle_rad, Some(1.51844));
        assert_eq!(params.front.mount_angle_rad, Some(1.31472));
        assert!((params.back.offset_in - 6.25).abs() < 1e-6);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_flat_mount_angle_rejected() {
        let mut params = DistanceParams::default();
        params.front.mount_angle_rad = Some(0.0);
        assert_eq!(
            params.validate(),
            Err(ParameterError::OutOfRange { name: "DIST_FRONT" })
        );
    }
}
