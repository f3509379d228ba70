//! Simulated motion controller
//!
//! Motions run in lockstep: nothing moves until the script blocks on a
//! wait, then the controller steps the robot one control period at a time
//! until the wait resolves. Odometry integrates the same chassis motion as
//! the robot model, starting from whatever pose the script sets.

use corner_pilot_core::actuator::{ActuatorError, Actuators};
use corner_pilot_core::localization::normalize_heading;
use corner_pilot_core::maneuver::{MotionController, MoveParams, TurnParams, WaitOutcome};
use corner_pilot_core::traits::TimeSource;
use corner_pilot_core::Pose;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::robot::{SharedRobot, StepMotion};

/// Stick output per degree of heading error
const TURN_GAIN: f32 = 2.0;
/// Stick output per inch of distance error
const DRIVE_GAIN: f32 = 8.0;
/// Full stick deflection
const STICK_MAX: f32 = 127.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Pose { pose: Pose, params: MoveParams },
    Heading { heading: f32, params: TurnParams },
}

#[derive(Debug, Clone, Copy)]
struct ActiveMotion {
    target: Target,
    started_ms: u64,
    timeout_ms: u32,
    traveled_in: f32,
}

/// Motion controller driving a [`SharedRobot`] in simulated time.
pub struct SimMotion {
    robot: SharedRobot,
    clock: SimClock,
    tick_ms: u64,
    arrive_tolerance_in: f32,
    heading_tolerance_deg: f32,
    odometry: Pose,
    active: Option<ActiveMotion>,
    last_outcome: WaitOutcome,
}

impl SimMotion {
    pub fn new(robot: SharedRobot, clock: SimClock, config: &SimConfig) -> Self {
        Self {
            robot,
            clock,
            tick_ms: config.tick_ms,
            arrive_tolerance_in: config.arrive_tolerance_in,
            heading_tolerance_deg: config.heading_tolerance_deg,
            odometry: Pose::default(),
            active: None,
            last_outcome: WaitOutcome::Reached,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    fn start(&mut self, target: Target, timeout_ms: u32) -> Result<(), ActuatorError> {
        // A new motion waits for the running one
        if self.active.is_some() {
            self.wait_until_done()?;
        }
        self.active = Some(ActiveMotion {
            target,
            started_ms: self.clock.now_ms(),
            timeout_ms,
            traveled_in: 0.0,
        });
        Ok(())
    }

    /// Step until `reached` holds for the active motion or it ends.
    fn run_until(
        &mut self,
        reached: impl Fn(&ActiveMotion) -> bool,
    ) -> Result<WaitOutcome, ActuatorError> {
        loop {
            let Some(motion) = self.active else {
                return Ok(self.last_outcome);
            };
            if reached(&motion) {
                return Ok(WaitOutcome::Reached);
            }
            self.step()?;
        }
    }

    /// One control period: command, integrate, check completion.
    fn step(&mut self) -> Result<(), ActuatorError> {
        let Some(mut motion) = self.active else {
            return Ok(());
        };

        let elapsed = self.clock.now_ms().saturating_sub(motion.started_ms);
        if elapsed >= motion.timeout_ms as u64 {
            return self.finish(WaitOutcome::TimedOut);
        }

        let command = match motion.target {
            Target::Heading { heading, params } => self.turn_command(heading, params),
            Target::Pose { pose, params } => self.move_command(pose, params),
        };
        let Some((forward, turn)) = command else {
            return self.finish(WaitOutcome::Reached);
        };

        let step = {
            let mut robot = self.robot.lock();
            robot.arcade(forward, turn)?;
            robot.step(self.tick_ms)
        };
        self.integrate(step);
        self.clock.advance(self.tick_ms);

        motion.traveled_in += step.forward_in.abs();
        self.active = Some(motion);
        Ok(())
    }

    fn finish(&mut self, outcome: WaitOutcome) -> Result<(), ActuatorError> {
        self.robot.lock().arcade(0, 0)?;
        self.active = None;
        self.last_outcome = outcome;
        Ok(())
    }

    fn integrate(&mut self, step: StepMotion) {
        let mid = (self.odometry.heading + step.turn_deg / 2.0).to_radians();
        self.odometry = Pose::new(
            self.odometry.x + step.forward_in * mid.sin(),
            self.odometry.y + step.forward_in * mid.cos(),
            self.odometry.heading + step.turn_deg,
        );
    }

    /// Turn-in-place command, `None` once within tolerance.
    fn turn_command(&self, heading: f32, params: TurnParams) -> Option<(i16, i16)> {
        let error = heading_error(heading, self.odometry.heading);
        if error.abs() <= self.heading_tolerance_deg {
            return None;
        }
        let turn = limit(TURN_GAIN * error, params.min_speed, params.max_speed);
        Some((0, turn as i16))
    }

    /// Drive to the point, then settle on the target heading. `None` once
    /// both are within tolerance.
    fn move_command(&self, target: Pose, params: MoveParams) -> Option<(i16, i16)> {
        let dx = target.x - self.odometry.x;
        let dy = target.y - self.odometry.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= self.arrive_tolerance_in {
            return self.turn_command(target.heading, TurnParams::new(params.max_speed, 0.0));
        }

        let bearing = dx.atan2(dy).to_degrees();
        let (facing, sign) = if params.forwards {
            (bearing, 1.0)
        } else {
            (bearing + 180.0, -1.0)
        };
        let error = heading_error(facing, self.odometry.heading);

        let alignment = error.to_radians().cos().max(0.0);
        let forward = limit(DRIVE_GAIN * distance, params.min_speed, params.max_speed) * alignment;
        let turn = (TURN_GAIN * error).clamp(-STICK_MAX, STICK_MAX);
        Some(((sign * forward) as i16, turn as i16))
    }
}

impl MotionController for SimMotion {
    fn set_pose(&mut self, pose: Pose) -> Result<(), ActuatorError> {
        self.odometry = pose;
        Ok(())
    }

    fn pose(&self) -> Pose {
        self.odometry
    }

    fn move_to_pose(
        &mut self,
        target: Pose,
        timeout_ms: u32,
        params: MoveParams,
    ) -> Result<(), ActuatorError> {
        self.start(
            Target::Pose {
                pose: target,
                params,
            },
            timeout_ms,
        )
    }

    fn turn_to_heading(
        &mut self,
        heading: f32,
        timeout_ms: u32,
        params: TurnParams,
    ) -> Result<(), ActuatorError> {
        self.start(Target::Heading { heading, params }, timeout_ms)
    }

    fn wait_until(&mut self, distance_in: f32) -> Result<WaitOutcome, ActuatorError> {
        self.run_until(|motion| motion.traveled_in >= distance_in)
    }

    fn wait_until_done(&mut self) -> Result<WaitOutcome, ActuatorError> {
        self.run_until(|_| false)
    }
}

/// Signed shortest rotation from `current` to `target`, in (-180, 180].
fn heading_error(target: f32, current: f32) -> f32 {
    let error = normalize_heading(target - current);
    if error > 180.0 {
        error - 360.0
    } else {
        error
    }
}

/// Clamp magnitude into [min, max], keeping the sign.
fn limit(value: f32, min: f32, max: f32) -> f32 {
    value.signum() * value.abs().clamp(min, max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corner_pilot_core::parameters::RobotParams;
    use corner_pilot_core::traits::TimeSource;

    use crate::robot::SimRobot;

    fn setup(placement: Pose) -> (SimMotion, SharedRobot, SimClock) {
        let config = SimConfig::deterministic(1);
        let robot = SharedRobot::new(SimRobot::new(
            config.clone(),
            &RobotParams::default(),
            placement,
        ));
        let clock = SimClock::new();
        let mut motion = SimMotion::new(robot.clone(), clock.clone(), &config);
        motion.set_pose(placement).unwrap();
        (motion, robot, clock)
    }

    #[test]
    fn heading_error_wraps() {
        assert_eq!(heading_error(10.0, 350.0), 20.0);
        assert_eq!(heading_error(350.0, 10.0), -20.0);
        assert_eq!(heading_error(180.0, 0.0), 180.0);
    }

    #[test]
    fn turn_reaches_heading() {
        let (mut motion, robot, _) = setup(Pose::new(0.0, 0.0, 0.0));
        motion
            .turn_to_heading(90.0, 4000, TurnParams::new(50.0, 30.0))
            .unwrap();
        assert_eq!(motion.wait_until_done().unwrap(), WaitOutcome::Reached);
        assert!(heading_error(90.0, motion.pose().heading).abs() <= 2.0);
        assert!(heading_error(90.0, robot.lock().pose().heading).abs() <= 2.0);
        assert_eq!(robot.lock().drive_command(), (0, 0));
        assert!(!motion.is_busy());
    }

    #[test]
    fn move_reaches_target_forwards_and_backwards() {
        let (mut motion, _, _) = setup(Pose::new(0.0, 0.0, 0.0));
        motion
            .move_to_pose(Pose::new(0.0, 24.0, 0.0), 4000, MoveParams::default())
            .unwrap();
        assert_eq!(motion.wait_until_done().unwrap(), WaitOutcome::Reached);
        assert!((motion.pose().y - 24.0).abs() <= 1.5);
        assert!(heading_error(0.0, motion.pose().heading).abs() <= 2.0);

        motion
            .move_to_pose(
                Pose::new(0.0, 0.0, 0.0),
                4000,
                MoveParams::new(false, 80.0, 0.0),
            )
            .unwrap();
        assert_eq!(motion.wait_until_done().unwrap(), WaitOutcome::Reached);
        assert!(motion.pose().y.abs() <= 1.5);
        // Backed up without turning around
        assert!(heading_error(0.0, motion.pose().heading).abs() < 10.0);
    }

    #[test]
    fn wait_until_returns_mid_motion() {
        let (mut motion, _, _) = setup(Pose::new(0.0, -40.0, 0.0));
        motion
            .move_to_pose(Pose::new(0.0, 40.0, 0.0), 4000, MoveParams::default())
            .unwrap();
        assert_eq!(motion.wait_until(10.0).unwrap(), WaitOutcome::Reached);
        assert!(motion.is_busy());
        let y = motion.pose().y;
        assert!(y > -31.0 && y < 0.0);
    }

    #[test]
    fn timeout_stops_motion() {
        let (mut motion, robot, clock) = setup(Pose::new(0.0, 0.0, 0.0));
        motion
            .move_to_pose(Pose::new(0.0, 60.0, 0.0), 100, MoveParams::default())
            .unwrap();
        assert_eq!(motion.wait_until_done().unwrap(), WaitOutcome::TimedOut);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(robot.lock().drive_command(), (0, 0));
    }

    #[test]
    fn wait_with_nothing_running_returns_immediately() {
        let (mut motion, _, clock) = setup(Pose::default());
        assert_eq!(motion.wait_until(5.0).unwrap(), WaitOutcome::Reached);
        assert_eq!(clock.now_ms(), 0);
    }
}
