//! Build-time parameter blocks
//!
//! Calibration constants for the field, the distance sensors, the lift and
//! the ejection mechanism. Every block carries named `DEFAULT_*` constants,
//! a `Default` impl and a `validate()` check. There is no runtime parameter
//! store: values are fixed when the program is built and handed to each
//! component by value.

pub mod distance;
pub mod ejection;
pub mod error;
pub mod field;
pub mod lift;
pub mod operator;

pub use distance::{DistanceParams, SensorCalibration};
pub use ejection::EjectionParams;
pub use error::ParameterError;
pub use field::FieldParams;
pub use lift::LiftMacroParams;
pub use operator::OperatorParams;

/// All parameter blocks for one robot build
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RobotParams {
    pub field: FieldParams,
    pub distance: DistanceParams,
    pub lift: LiftMacroParams,
    pub ejection: EjectionParams,
    pub operator: OperatorParams,
}

impl RobotParams {
    /// Validate every block, returning the first failure
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.field.validate()?;
        self.distance.validate()?;
        self.lift.validate()?;
        self.ejection.validate()?;
        self.operator.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_robot_params_are_valid() {
        assert_eq!(RobotParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_first_failing_block_is_reported() {
        let mut params = RobotParams::default();
        params.field.field_size_in = -1.0;
        params.lift.safety_timeout_ms = 0;

        assert_eq!(
            params.validate(),
            Err(ParameterError::OutOfRange {
                name: "FIELD_SIZE_IN"
            })
        );
    }
}
