//! Manual operation parameters

use super::error::ParameterError;

/// Intake velocity for the intake in/out buttons (rpm)
pub const DEFAULT_INTAKE_VELOCITY: i16 = 200;
/// Period of the distance telemetry report (ms)
pub const DEFAULT_TELEMETRY_PERIOD_MS: u32 = 20;

/// Manual operation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorParams {
    pub intake_velocity: i16,
    pub telemetry_period_ms: u32,
}

impl Default for OperatorParams {
    fn default() -> Self {
        Self {
            intake_velocity: DEFAULT_INTAKE_VELOCITY,
            telemetry_period_ms: DEFAULT_TELEMETRY_PERIOD_MS,
        }
    }
}

impl OperatorParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.intake_velocity <= 0 {
            return Err(ParameterError::OutOfRange { name: "OP_INTAKE_VEL" });
        }
        if self.telemetry_period_ms == 0 {
            return Err(ParameterError::OutOfRange { name: "OP_TELEM_MS" });
        }
        Ok(())
    }
}
