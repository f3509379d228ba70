//! Maneuver player
//!
//! Interprets a step list in order. Motion steps go to the
//! [`MotionController`], lift and redirect steps go straight to the
//! actuators. The only way out before the last step is an actuator fault.

use heapless::Vec;

use crate::actuator::{ActuatorError, Actuators, Pneumatic};

use super::motion::{MotionController, WaitOutcome};
use super::step::Step;

/// Timed-out waits kept in a [`PlaybackReport`]; later ones are only counted
pub const MAX_RECORDED_TIMEOUTS: usize = 16;

/// What happened while playing a script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackReport {
    /// Steps executed
    pub steps_run: usize,
    /// Indices of wait steps that timed out
    pub timed_out: Vec<usize, MAX_RECORDED_TIMEOUTS>,
    /// Total timed-out waits, including ones not recorded above
    pub timeout_count: usize,
}

impl PlaybackReport {
    /// True if every wait reached its condition
    pub fn is_clean(&self) -> bool {
        self.timeout_count == 0
    }
}

/// Run `steps` to completion.
///
/// Waits that time out are recorded and playback continues; a fault from
/// the motion controller or an actuator stops playback and is returned.
pub fn play(
    steps: &[Step],
    motion: &mut dyn MotionController,
    actuators: &mut dyn Actuators,
) -> Result<PlaybackReport, ActuatorError> {
    let mut report = PlaybackReport::default();

    for (index, step) in steps.iter().enumerate() {
        let outcome = match *step {
            Step::TurnToHeading {
                heading,
                timeout_ms,
                params,
            } => {
                motion.turn_to_heading(heading, timeout_ms, params)?;
                None
            }
            Step::MoveToPose {
                target,
                timeout_ms,
                params,
            } => {
                motion.move_to_pose(target, timeout_ms, params)?;
                None
            }
            Step::WaitUntilTravel { distance_in } => Some(motion.wait_until(distance_in)?),
            Step::WaitUntilDone => Some(motion.wait_until_done()?),
            Step::LiftRelative { ticks, rpm } => {
                actuators.move_lift_relative(ticks, rpm)?;
                None
            }
            Step::SetRedirect(extended) => {
                actuators.set_pneumatic(Pneumatic::Redirect, extended)?;
                None
            }
        };

        if outcome == Some(WaitOutcome::TimedOut) {
            report.timeout_count += 1;
            let _ = report.timed_out.push(index);
        }
        report.steps_run += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{LiftOutput, MockActuators};
    use crate::localization::{Corner, Pose};
    use crate::maneuver::motion::{MockMotion, MotionCall};
    use crate::maneuver::script::{script_for, LEFT_BACK, SCRIPT_LEN};

    #[test]
    fn test_plays_full_left_back_script() {
        let mut motion = MockMotion::new();
        let mut actuators = MockActuators::new();

        let report = play(&LEFT_BACK, &mut motion, &mut actuators).unwrap();

        assert_eq!(report.steps_run, SCRIPT_LEN);
        assert!(report.is_clean());
        // Lift and redirect steps never reach the motion controller
        assert_eq!(motion.calls.len(), SCRIPT_LEN - 6);
        assert_eq!(motion.pose(), Pose::new(-14.0, -28.0, 335.0));
        assert!(!actuators.pneumatic(Pneumatic::Redirect));
        assert_eq!(actuators.pneumatic_writes, 2);
        assert_eq!(
            actuators.lift,
            LiftOutput::Relative {
                ticks: 700.0,
                rpm: 200
            }
        );
    }

    #[test]
    fn test_right_back_sends_mirrored_targets() {
        let script = script_for(Corner::RightBack).unwrap();
        let mut motion = MockMotion::new();
        let mut actuators = MockActuators::new();

        play(&script, &mut motion, &mut actuators).unwrap();

        let first_move = motion
            .calls
            .iter()
            .find_map(|call| match call {
                MotionCall::Move { target, .. } => Some(*target),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_move.x, -60.0);
        assert_eq!(first_move.y, 13.0);
        assert!((first_move.heading - 210.0).abs() < 1e-4);
    }

    #[test]
    fn test_timeout_is_recorded_and_playback_continues() {
        let mut motion = MockMotion::new();
        motion.timeouts.push(0).unwrap();
        let mut actuators = MockActuators::new();

        let report = play(&LEFT_BACK, &mut motion, &mut actuators).unwrap();

        assert_eq!(report.steps_run, SCRIPT_LEN);
        assert_eq!(report.timeout_count, 1);
        // First wait is the wait-done after the opening turn
        assert_eq!(report.timed_out.as_slice(), &[1]);
    }

    #[test]
    fn test_actuator_fault_aborts() {
        let mut motion = MockMotion::new();
        let mut actuators = MockActuators::new();
        actuators.fail_device = Some("lift");

        let result = play(&LEFT_BACK, &mut motion, &mut actuators);

        assert_eq!(
            result,
            Err(ActuatorError::HardwareFault { device: "lift" })
        );
        // Stopped at the first lift step: turn, wait, move, travel
        assert_eq!(motion.calls.len(), 4);
    }

    #[test]
    fn test_motion_fault_aborts() {
        let mut motion = MockMotion::new();
        motion.fail_at_call = Some(0);
        let mut actuators = MockActuators::new();

        let result = play(&LEFT_BACK, &mut motion, &mut actuators);
        assert_eq!(result, Err(ActuatorError::MotionFault));
        assert_eq!(actuators.pneumatic_writes, 0);
    }

    #[test]
    fn test_empty_script() {
        let mut motion = MockMotion::new();
        let mut actuators = MockActuators::new();
        let report = play(&[], &mut motion, &mut actuators).unwrap();
        assert_eq!(report.steps_run, 0);
        assert!(motion.calls.is_empty());
    }
}
