//! Actuator abstraction
//!
//! The robot's outputs as the control logic sees them: an arcade drive,
//! two intake motors, the lift motor group and four pneumatic valves.
//! Motor and valve drivers live outside this crate and implement
//! [`Actuators`].
//!
//! Velocities are in motor rpm (green cartridge, ±200). Drive inputs are
//! raw stick values (±127).
//!
//! # Errors
//!
//! Implementations return [`ActuatorError`] for hardware faults. Callers
//! propagate with `?`; none of the control logic retries.

pub mod mock;

use core::fmt;

pub use mock::{LiftOutput, MockActuators};

/// Actuator error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// A motor or valve did not accept the command
    HardwareFault {
        /// Device that failed
        device: &'static str,
    },
    /// The motion controller rejected or aborted a motion
    MotionFault,
    /// Command value outside the device's range
    InvalidCommand,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::HardwareFault { device } => write!(f, "hardware fault on {}", device),
            ActuatorError::MotionFault => write!(f, "motion controller fault"),
            ActuatorError::InvalidCommand => write!(f, "command out of range"),
        }
    }
}

impl core::error::Error for ActuatorError {}

/// Intake motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeMotor {
    Upper,
    Lower,
}

/// Pneumatic outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pneumatic {
    GrabLeft,
    GrabRight,
    IntakeLift,
    /// Diverts scored objects; driven by the lift macros and the operator
    Redirect,
}

impl Pneumatic {
    pub const ALL: [Pneumatic; 4] = [
        Pneumatic::GrabLeft,
        Pneumatic::GrabRight,
        Pneumatic::IntakeLift,
        Pneumatic::Redirect,
    ];
}

/// Motor behavior when commanded to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakeMode {
    /// Freewheel
    Coast,
    /// Short the windings
    Brake,
    /// Actively hold position
    Hold,
}

/// Robot actuator interface
pub trait Actuators {
    /// Arcade drive from stick values
    fn arcade(&mut self, forward: i16, turn: i16) -> Result<(), ActuatorError>;

    /// Spin one intake motor
    fn set_intake_velocity(&mut self, motor: IntakeMotor, rpm: i16) -> Result<(), ActuatorError>;

    /// Drive the lift at a velocity
    fn set_lift_velocity(&mut self, rpm: i16) -> Result<(), ActuatorError>;

    /// Stop the lift using its brake mode
    fn brake_lift(&mut self) -> Result<(), ActuatorError>;

    /// Move the lift by an encoder delta at the given velocity.
    ///
    /// Returns as soon as the command is issued; the motor finishes the
    /// move on its own.
    fn move_lift_relative(&mut self, ticks: f32, rpm: i16) -> Result<(), ActuatorError>;

    /// Extend (`true`) or retract a pneumatic
    fn set_pneumatic(&mut self, output: Pneumatic, extended: bool) -> Result<(), ActuatorError>;

    /// Configure stop behavior of the intake and lift motors
    fn set_brake_modes(&mut self, intake: BrakeMode, lift: BrakeMode)
        -> Result<(), ActuatorError>;
}

#[cfg(test)]
mod tests {
    use std::format;

    use super::*;

    #[test]
    fn test_actuator_error_display() {
        let err = ActuatorError::HardwareFault { device: "lift" };
        assert_eq!(format!("{}", err), "hardware fault on lift");
        assert_eq!(format!("{}", ActuatorError::MotionFault), "motion controller fault");
    }

    #[test]
    fn test_all_pneumatics_distinct() {
        for (i, a) in Pneumatic::ALL.iter().enumerate() {
            for b in &Pneumatic::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
