//! Motion controller interface
//!
//! The trajectory follower and its PID loops are outside this crate. The
//! maneuver player only needs to start motions, wait on them and set the
//! initial pose.

use crate::actuator::ActuatorError;
use crate::localization::Pose;

use super::step::{MoveParams, TurnParams};

/// How a blocking wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition was met
    Reached,
    /// The motion's timeout expired first; the controller has stopped it
    TimedOut,
}

/// Motion controller used by scripted maneuvers.
///
/// `move_to_pose` and `turn_to_heading` start a motion and return. The
/// `wait_*` methods block the caller until their condition holds or the
/// running motion times out.
pub trait MotionController {
    /// Overwrite the odometry pose
    fn set_pose(&mut self, pose: Pose) -> Result<(), ActuatorError>;

    /// Current odometry pose
    fn pose(&self) -> Pose;

    /// Start driving to `target`
    fn move_to_pose(
        &mut self,
        target: Pose,
        timeout_ms: u32,
        params: MoveParams,
    ) -> Result<(), ActuatorError>;

    /// Start turning in place to `heading` (degrees)
    fn turn_to_heading(
        &mut self,
        heading: f32,
        timeout_ms: u32,
        params: TurnParams,
    ) -> Result<(), ActuatorError>;

    /// Block until the current motion has traveled `distance_in` inches
    fn wait_until(&mut self, distance_in: f32) -> Result<WaitOutcome, ActuatorError>;

    /// Block until the current motion completes
    fn wait_until_done(&mut self) -> Result<WaitOutcome, ActuatorError>;
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Capacity of the [`MockMotion`] call log
pub const MOCK_CALL_CAPACITY: usize = 64;

/// A call recorded by [`MockMotion`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCall {
    SetPose(Pose),
    Move {
        target: Pose,
        timeout_ms: u32,
        params: MoveParams,
    },
    Turn {
        heading: f32,
        timeout_ms: u32,
        params: TurnParams,
    },
    WaitTravel(f32),
    WaitDone,
}

/// Motion controller that records calls and arrives instantly.
///
/// `wait_until_done` snaps the pose to the pending target. Waits listed in
/// `timeouts` (by wait ordinal, counting from zero) report
/// [`WaitOutcome::TimedOut`] and leave the pose where it was.
#[derive(Debug, Default)]
pub struct MockMotion {
    pub pose: Pose,
    pub calls: heapless::Vec<MotionCall, MOCK_CALL_CAPACITY>,
    pub timeouts: heapless::Vec<usize, 8>,
    /// Fail the call with this index (into `calls`) with a motion fault
    pub fail_at_call: Option<usize>,
    pending: Option<Pose>,
    waits: usize,
}

impl MockMotion {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: MotionCall) -> Result<(), ActuatorError> {
        if self.fail_at_call == Some(self.calls.len()) {
            return Err(ActuatorError::MotionFault);
        }
        // A full log drops calls rather than failing the script
        let _ = self.calls.push(call);
        Ok(())
    }

    fn next_wait(&mut self) -> WaitOutcome {
        let ordinal = self.waits;
        self.waits += 1;
        if self.timeouts.contains(&ordinal) {
            WaitOutcome::TimedOut
        } else {
            WaitOutcome::Reached
        }
    }
}

impl MotionController for MockMotion {
    fn set_pose(&mut self, pose: Pose) -> Result<(), ActuatorError> {
        self.record(MotionCall::SetPose(pose))?;
        self.pose = pose;
        Ok(())
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn move_to_pose(
        &mut self,
        target: Pose,
        timeout_ms: u32,
        params: MoveParams,
    ) -> Result<(), ActuatorError> {
        self.record(MotionCall::Move {
            target,
            timeout_ms,
            params,
        })?;
        self.pending = Some(target);
        Ok(())
    }

    fn turn_to_heading(
        &mut self,
        heading: f32,
        timeout_ms: u32,
        params: TurnParams,
    ) -> Result<(), ActuatorError> {
        self.record(MotionCall::Turn {
            heading,
            timeout_ms,
            params,
        })?;
        self.pending = Some(Pose::new(self.pose.x, self.pose.y, heading));
        Ok(())
    }

    fn wait_until(&mut self, distance_in: f32) -> Result<WaitOutcome, ActuatorError> {
        self.record(MotionCall::WaitTravel(distance_in))?;
        Ok(self.next_wait())
    }

    fn wait_until_done(&mut self) -> Result<WaitOutcome, ActuatorError> {
        self.record(MotionCall::WaitDone)?;
        let outcome = self.next_wait();
        let target = self.pending.take();
        if let (WaitOutcome::Reached, Some(target)) = (outcome, target) {
            self.pose = target;
        }
        Ok(outcome)
    }
}
