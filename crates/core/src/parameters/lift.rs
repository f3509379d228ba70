//! Lift macro parameters
//!
//! Encoder targets are calibration constants tied to the physical travel
//! range of the lift.

use super::error::ParameterError;

/// Encoder position the raise macro drives up to
pub const DEFAULT_RAISE_TARGET: f32 = 875.0;
/// Encoder position the lower macro drives down to
pub const DEFAULT_LOWER_TARGET: f32 = 141.0;
/// Lift velocity while raising (rpm)
pub const DEFAULT_RAISE_VELOCITY: i16 = 200;
/// Lift velocity while lowering (rpm)
pub const DEFAULT_LOWER_VELOCITY: i16 = -180;
/// Safety timeout for either macro (ms)
pub const DEFAULT_SAFETY_TIMEOUT_MS: u32 = 2000;

/// Lift macro parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftMacroParams {
    pub raise_target: f32,
    pub lower_target: f32,
    pub raise_velocity: i16,
    pub lower_velocity: i16,
    pub safety_timeout_ms: u32,
}

impl Default for LiftMacroParams {
    fn default() -> Self {
        Self {
            raise_target: DEFAULT_RAISE_TARGET,
            lower_target: DEFAULT_LOWER_TARGET,
            raise_velocity: DEFAULT_RAISE_VELOCITY,
            lower_velocity: DEFAULT_LOWER_VELOCITY,
            safety_timeout_ms: DEFAULT_SAFETY_TIMEOUT_MS,
        }
    }
}

impl LiftMacroParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.safety_timeout_ms == 0 {
            return Err(ParameterError::OutOfRange {
                name: "LIFT_SAFETY_MS",
            });
        }
        if self.raise_velocity <= 0 {
            return Err(ParameterError::OutOfRange {
                name: "LIFT_RAISE_VEL",
            });
        }
        if self.lower_velocity >= 0 {
            return Err(ParameterError::OutOfRange {
                name: "LIFT_LOWER_VEL",
            });
        }
        if self.lower_target >= self.raise_target {
            return Err(ParameterError::Inconsistent {
                reason: "lower target above raise target",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_defaults() {
        let params = LiftMacroParams::default();
        assert_eq!(params.raise_target, 875.0);
        assert_eq!(params.lower_target, 141.0);
        assert_eq!(params.safety_timeout_ms, 2000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_swapped_targets_rejected() {
        let params = LiftMacroParams {
            raise_target: 100.0,
            lower_target: 900.0,
            ..LiftMacroParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_wrong_velocity_sign_rejected() {
        let params = LiftMacroParams {
            lower_velocity: 180,
            ..LiftMacroParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::OutOfRange {
                name: "LIFT_LOWER_VEL"
            })
        );
    }
}
