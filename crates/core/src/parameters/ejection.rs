//! Ejection chain parameters

use super::error::ParameterError;

/// First stage length (ms): upper intake held off manual control
pub const DEFAULT_STAGE1_MS: u32 = 170;
/// Second stage length (ms): upper intake spun at ejection velocity
pub const DEFAULT_STAGE2_MS: u32 = 400;
/// Sort sensor distance that triggers the chain (inches)
pub const DEFAULT_TRIGGER_DISTANCE_IN: f32 = 5.0;
/// Upper intake velocity during the second stage (rpm)
pub const DEFAULT_EJECT_VELOCITY: i16 = 200;

/// Ejection chain parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EjectionParams {
    pub stage1_ms: u32,
    pub stage2_ms: u32,
    pub trigger_distance_in: f32,
    pub eject_velocity: i16,
}

impl Default for EjectionParams {
    fn default() -> Self {
        Self {
            stage1_ms: DEFAULT_STAGE1_MS,
            stage2_ms: DEFAULT_STAGE2_MS,
            trigger_distance_in: DEFAULT_TRIGGER_DISTANCE_IN,
            eject_velocity: DEFAULT_EJECT_VELOCITY,
        }
    }
}

impl EjectionParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.stage1_ms == 0 {
            return Err(ParameterError::OutOfRange { name: "EJECT_STAGE1_MS" });
        }
        if self.stage2_ms == 0 {
            return Err(ParameterError::OutOfRange { name: "EJECT_STAGE2_MS" });
        }
        if !(self.trigger_distance_in > 0.0) {
            return Err(ParameterError::OutOfRange { name: "EJECT_TRIGGER_IN" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ejection_defaults() {
        let params = EjectionParams::default();
        assert_eq!(params.stage1_ms, 170);
        assert_eq!(params.stage2_ms, 400);
        assert_eq!(params.eject_velocity, 200);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_stage_rejected() {
        let params = EjectionParams {
            stage2_ms: 0,
            ..EjectionParams::default()
        };
        assert!(params.validate().is_err());
    }
}
