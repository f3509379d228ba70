//! Mock actuators for host testing
//!
//! Keeps the last command sent to every output so tests can assert on
//! the state the robot would be in after a tick.

use super::{ActuatorError, Actuators, BrakeMode, IntakeMotor, Pneumatic};

/// Last command sent to the lift
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiftOutput {
    Idle,
    Velocity(i16),
    Braked,
    Relative { ticks: f32, rpm: i16 },
}

/// Actuator mock that records output state
#[derive(Debug, Clone)]
pub struct MockActuators {
    pub drive: (i16, i16),
    pub upper_intake: i16,
    pub lower_intake: i16,
    pub lift: LiftOutput,
    /// Extended state per [`Pneumatic::ALL`] index
    pub pneumatics: [bool; 4],
    pub brake_modes: Option<(BrakeMode, BrakeMode)>,
    /// Number of pneumatic writes (to check on-change behavior)
    pub pneumatic_writes: u32,
    /// Number of intake velocity writes
    pub intake_writes: u32,
    /// When set, every command fails with this device name
    pub fail_device: Option<&'static str>,
}

impl Default for MockActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl MockActuators {
    pub fn new() -> Self {
        Self {
            drive: (0, 0),
            upper_intake: 0,
            lower_intake: 0,
            lift: LiftOutput::Idle,
            pneumatics: [false; 4],
            brake_modes: None,
            pneumatic_writes: 0,
            intake_writes: 0,
            fail_device: None,
        }
    }

    /// Current state of one pneumatic
    pub fn pneumatic(&self, output: Pneumatic) -> bool {
        self.pneumatics[index_of(output)]
    }

    fn check(&self) -> Result<(), ActuatorError> {
        match self.fail_device {
            Some(device) => Err(ActuatorError::HardwareFault { device }),
            None => Ok(()),
        }
    }
}

fn index_of(output: Pneumatic) -> usize {
    match output {
        Pneumatic::GrabLeft => 0,
        Pneumatic::GrabRight => 1,
        Pneumatic::IntakeLift => 2,
        Pneumatic::Redirect => 3,
    }
}

impl Actuators for MockActuators {
    fn arcade(&mut self, forward: i16, turn: i16) -> Result<(), ActuatorError> {
        self.check()?;
        self.drive = (forward, turn);
        Ok(())
    }

    fn set_intake_velocity(&mut self, motor: IntakeMotor, rpm: i16) -> Result<(), ActuatorError> {
        self.check()?;
        self.intake_writes += 1;
        match motor {
            IntakeMotor::Upper => self.upper_intake = rpm,
            IntakeMotor::Lower => self.lower_intake = rpm,
        }
        Ok(())
    }

    fn set_lift_velocity(&mut self, rpm: i16) -> Result<(), ActuatorError> {
        self.check()?;
        self.lift = LiftOutput::Velocity(rpm);
        Ok(())
    }

    fn brake_lift(&mut self) -> Result<(), ActuatorError> {
        self.check()?;
        self.lift = LiftOutput::Braked;
        Ok(())
    }

    fn move_lift_relative(&mut self, ticks: f32, rpm: i16) -> Result<(), ActuatorError> {
        self.check()?;
        self.lift = LiftOutput::Relative { ticks, rpm };
        Ok(())
    }

    fn set_pneumatic(&mut self, output: Pneumatic, extended: bool) -> Result<(), ActuatorError> {
        self.check()?;
        self.pneumatic_writes += 1;
        self.pneumatics[index_of(output)] = extended;
        Ok(())
    }

    fn set_brake_modes(
        &mut self,
        intake: BrakeMode,
        lift: BrakeMode,
    ) -> Result<(), ActuatorError> {
        self.check()?;
        self.brake_modes = Some((intake, lift));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_last_state() {
        let mut act = MockActuators::new();
        act.arcade(50, -20).unwrap();
        act.set_intake_velocity(IntakeMotor::Upper, 200).unwrap();
        act.set_pneumatic(Pneumatic::Redirect, true).unwrap();
        act.move_lift_relative(700.0, 200).unwrap();

        assert_eq!(act.drive, (50, -20));
        assert_eq!(act.upper_intake, 200);
        assert_eq!(act.lower_intake, 0);
        assert!(act.pneumatic(Pneumatic::Redirect));
        assert!(!act.pneumatic(Pneumatic::GrabLeft));
        assert_eq!(act.lift, LiftOutput::Relative { ticks: 700.0, rpm: 200 });
    }

    #[test]
    fn test_mock_fault_injection() {
        let mut act = MockActuators::new();
        act.fail_device = Some("lift");
        assert_eq!(
            act.brake_lift(),
            Err(ActuatorError::HardwareFault { device: "lift" })
        );
    }
}
