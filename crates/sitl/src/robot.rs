//! Simulated robot
//!
//! Kinematic model of the drivetrain and lift plus synthesized distance
//! sensor readings. Field frame matches the core: inches from the field
//! center, heading in degrees clockwise from +y.

use std::sync::{Arc, Mutex, MutexGuard};

use corner_pilot_core::actuator::{ActuatorError, Actuators, BrakeMode, IntakeMotor, Pneumatic};
use corner_pilot_core::control::SensorSnapshot;
use corner_pilot_core::localization::normalize_heading;
use corner_pilot_core::parameters::{DistanceParams, RobotParams, SensorCalibration};
use corner_pilot_core::sensing::{correction_factor, RawDistances, MM_PER_INCH};
use corner_pilot_core::Pose;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;

/// Full stick deflection
const STICK_MAX: f32 = 127.0;
/// Lift motor rpm at which `lift_ticks_per_sec` is reached
const LIFT_RATED_RPM: f32 = 200.0;
/// Keep the robot center this far from the walls
const WALL_MARGIN_IN: f32 = 1.0;
/// Sort sensor reading with a ring in front of it (mm)
const RING_READING_MM: f32 = 20.0;

/// Lift motor mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiftDrive {
    Hold,
    Velocity(i16),
    Relative { target: f32, rpm: i16 },
}

/// Motion of the chassis over one step, in the robot frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepMotion {
    /// Signed distance along the heading (inches)
    pub forward_in: f32,
    /// Heading change (degrees, clockwise positive)
    pub turn_deg: f32,
}

/// Simulated robot hardware.
pub struct SimRobot {
    config: SimConfig,
    distance: DistanceParams,
    half_field_in: f32,
    pose: Pose,
    drive: (i16, i16),
    upper_intake: i16,
    lower_intake: i16,
    lift: LiftDrive,
    lift_position: f32,
    pneumatics: [bool; 4],
    brake_modes: Option<(BrakeMode, BrakeMode)>,
    ring_present: bool,
    rng: StdRng,
}

impl SimRobot {
    pub fn new(config: SimConfig, params: &RobotParams, placement: Pose) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            distance: params.distance,
            half_field_in: params.field.half_field_in(),
            pose: placement,
            drive: (0, 0),
            upper_intake: 0,
            lower_intake: 0,
            lift: LiftDrive::Hold,
            lift_position: 0.0,
            pneumatics: [false; 4],
            brake_modes: None,
            ring_present: false,
            rng,
        }
    }

    /// True pose on the field.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn lift_position(&self) -> f32 {
        self.lift_position
    }

    pub fn lift_drive(&self) -> LiftDrive {
        self.lift
    }

    pub fn drive_command(&self) -> (i16, i16) {
        self.drive
    }

    pub fn intake_velocities(&self) -> (i16, i16) {
        (self.upper_intake, self.lower_intake)
    }

    pub fn pneumatic(&self, output: Pneumatic) -> bool {
        self.pneumatics[pneumatic_index(output)]
    }

    pub fn brake_modes(&self) -> Option<(BrakeMode, BrakeMode)> {
        self.brake_modes
    }

    /// Put a ring in front of the sort sensor (or take it away).
    pub fn set_ring_present(&mut self, present: bool) {
        self.ring_present = present;
    }

    /// Advance the model by `dt_ms`.
    pub fn step(&mut self, dt_ms: u64) -> StepMotion {
        let dt = dt_ms as f32 / 1000.0;

        let speed = self.drive.0 as f32 / STICK_MAX * self.config.max_drive_speed_ips;
        let rate = self.drive.1 as f32 / STICK_MAX * self.config.max_turn_rate_dps;

        let turn_deg = rate * dt;
        let mid_heading = (self.pose.heading + turn_deg / 2.0).to_radians();
        let forward_in = speed * dt;

        let limit = self.half_field_in - WALL_MARGIN_IN;
        let x = (self.pose.x + forward_in * mid_heading.sin()).clamp(-limit, limit);
        let y = (self.pose.y + forward_in * mid_heading.cos()).clamp(-limit, limit);
        self.pose = Pose::new(x, y, self.pose.heading + turn_deg);

        self.step_lift(dt);

        StepMotion {
            forward_in,
            turn_deg,
        }
    }

    fn step_lift(&mut self, dt: f32) {
        let ticks_per_rpm = self.config.lift_ticks_per_sec / LIFT_RATED_RPM;
        match self.lift {
            LiftDrive::Hold => {}
            LiftDrive::Velocity(rpm) => {
                self.lift_position += rpm as f32 * ticks_per_rpm * dt;
            }
            LiftDrive::Relative { target, rpm } => {
                let max_step = (rpm as f32).abs() * ticks_per_rpm * dt;
                let error = target - self.lift_position;
                if error.abs() <= max_step {
                    self.lift_position = target;
                    self.lift = LiftDrive::Hold;
                } else {
                    self.lift_position += max_step.copysign(error);
                }
            }
        }
        self.lift_position = self.lift_position.clamp(0.0, self.config.lift_max_ticks);
    }

    /// Sensor readings at `now_ms`.
    pub fn sensors(&mut self, now_ms: u64) -> SensorSnapshot {
        let distances = RawDistances {
            left_mm: self.read_wall(270.0, self.distance.left),
            right_mm: self.read_wall(90.0, self.distance.right),
            front_mm: self.read_wall(0.0, self.distance.front),
            back_mm: self.read_wall(180.0, self.distance.back),
        };
        let sort_mm = if self.ring_present {
            RING_READING_MM
        } else {
            self.config.distance_max_mm
        };
        SensorSnapshot {
            distances,
            sort_mm,
            lift_position: self.lift_position,
            imu_calibrating: now_ms < self.config.imu_calibration_ms,
        }
    }

    /// Raw reading of a sensor pointing `bearing` degrees from the heading.
    ///
    /// Inverts the calibration so that a normalized reading recovers the
    /// distance from the robot center to the wall.
    fn read_wall(&mut self, bearing: f32, calibration: SensorCalibration) -> f32 {
        let wall_in = self.ray_to_wall(normalize_heading(self.pose.heading + bearing));
        let raw_in = (wall_in - calibration.offset_in) / correction_factor(&calibration);
        let noise = self.gaussian_noise(self.config.distance_noise_mm);
        (raw_in * MM_PER_INCH + noise).clamp(0.0, self.config.distance_max_mm)
    }

    /// Distance from the robot center to the field wall along a heading.
    fn ray_to_wall(&self, heading: f32) -> f32 {
        let (dx, dy) = {
            let h = heading.to_radians();
            (h.sin(), h.cos())
        };
        let half = self.half_field_in;
        let mut best = f32::INFINITY;
        if dx.abs() > 1e-6 {
            let t = (half.copysign(dx) - self.pose.x) / dx;
            best = best.min(t);
        }
        if dy.abs() > 1e-6 {
            let t = (half.copysign(dy) - self.pose.y) / dy;
            best = best.min(t);
        }
        best.max(0.0)
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f32 = self.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * stddev
    }
}

impl std::fmt::Debug for SimRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimRobot")
            .field("pose", &self.pose)
            .field("lift_position", &self.lift_position)
            .field("drive", &self.drive)
            .finish()
    }
}

fn pneumatic_index(output: Pneumatic) -> usize {
    match output {
        Pneumatic::GrabLeft => 0,
        Pneumatic::GrabRight => 1,
        Pneumatic::IntakeLift => 2,
        Pneumatic::Redirect => 3,
    }
}

impl Actuators for SimRobot {
    fn arcade(&mut self, forward: i16, turn: i16) -> Result<(), ActuatorError> {
        self.drive = (forward, turn);
        Ok(())
    }

    fn set_intake_velocity(&mut self, motor: IntakeMotor, rpm: i16) -> Result<(), ActuatorError> {
        match motor {
            IntakeMotor::Upper => self.upper_intake = rpm,
            IntakeMotor::Lower => self.lower_intake = rpm,
        }
        Ok(())
    }

    fn set_lift_velocity(&mut self, rpm: i16) -> Result<(), ActuatorError> {
        self.lift = LiftDrive::Velocity(rpm);
        Ok(())
    }

    fn brake_lift(&mut self) -> Result<(), ActuatorError> {
        self.lift = LiftDrive::Hold;
        Ok(())
    }

    fn move_lift_relative(&mut self, ticks: f32, rpm: i16) -> Result<(), ActuatorError> {
        if rpm == 0 {
            return Err(ActuatorError::InvalidCommand);
        }
        self.lift = LiftDrive::Relative {
            target: self.lift_position + ticks,
            rpm,
        };
        Ok(())
    }

    fn set_pneumatic(&mut self, output: Pneumatic, extended: bool) -> Result<(), ActuatorError> {
        self.pneumatics[pneumatic_index(output)] = extended;
        Ok(())
    }

    fn set_brake_modes(&mut self, intake: BrakeMode, lift: BrakeMode) -> Result<(), ActuatorError> {
        self.brake_modes = Some((intake, lift));
        Ok(())
    }
}

// ============================================================================
// Shared handle
// ============================================================================

/// Robot shared between the control loop, the motion controller and the
/// autonomous task.
#[derive(Debug, Clone)]
pub struct SharedRobot {
    inner: Arc<Mutex<SimRobot>>,
}

impl SharedRobot {
    pub fn new(robot: SimRobot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(robot)),
        }
    }

    /// Lock the robot. A panic in another holder does not invalidate the
    /// model state, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, SimRobot> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Actuators for SharedRobot {
    fn arcade(&mut self, forward: i16, turn: i16) -> Result<(), ActuatorError> {
        self.lock().arcade(forward, turn)
    }

    fn set_intake_velocity(&mut self, motor: IntakeMotor, rpm: i16) -> Result<(), ActuatorError> {
        self.lock().set_intake_velocity(motor, rpm)
    }

    fn set_lift_velocity(&mut self, rpm: i16) -> Result<(), ActuatorError> {
        self.lock().set_lift_velocity(rpm)
    }

    fn brake_lift(&mut self) -> Result<(), ActuatorError> {
        self.lock().brake_lift()
    }

    fn move_lift_relative(&mut self, ticks: f32, rpm: i16) -> Result<(), ActuatorError> {
        self.lock().move_lift_relative(ticks, rpm)
    }

    fn set_pneumatic(&mut self, output: Pneumatic, extended: bool) -> Result<(), ActuatorError> {
        self.lock().set_pneumatic(output, extended)
    }

    fn set_brake_modes(&mut self, intake: BrakeMode, lift: BrakeMode) -> Result<(), ActuatorError> {
        self.lock().set_brake_modes(intake, lift)
    }
}
