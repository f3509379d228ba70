//! Simulator configuration

use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// Configuration for the simulated robot and control loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Control loop period in milliseconds.
    pub tick_ms: u64,
    /// Pose telemetry period in milliseconds.
    pub telemetry_ms: u64,
    /// Distance sensor noise standard deviation in millimeters.
    pub distance_noise_mm: f32,
    /// RNG seed for deterministic runs. None = random.
    pub seed: Option<u64>,
    /// Drive speed at full stick, inches per second.
    pub max_drive_speed_ips: f32,
    /// Turn rate at full stick, degrees per second.
    pub max_turn_rate_dps: f32,
    /// Lift encoder ticks per second at 200 rpm.
    pub lift_ticks_per_sec: f32,
    /// Upper lift travel limit in encoder ticks.
    pub lift_max_ticks: f32,
    /// Time after start during which the IMU reports calibrating.
    pub imu_calibration_ms: u64,
    /// Maximum range of the distance sensors in millimeters.
    pub distance_max_mm: f32,
    /// Distance within which a move counts as arrived, inches.
    pub arrive_tolerance_in: f32,
    /// Heading error within which a turn counts as finished, degrees.
    pub heading_tolerance_deg: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            telemetry_ms: 50,
            distance_noise_mm: 2.0,
            seed: None,
            max_drive_speed_ips: 60.0,
            max_turn_rate_dps: 360.0,
            lift_ticks_per_sec: 900.0,
            lift_max_ticks: 1000.0,
            imu_calibration_ms: 0,
            distance_max_mm: 2000.0,
            arrive_tolerance_in: 1.0,
            heading_tolerance_deg: 2.0,
        }
    }
}

impl SimConfig {
    /// Deterministic, noise-free configuration for tests.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            distance_noise_mm: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.tick_ms == 0 {
            return Err(SimulatorError::InvalidScenario(
                "tick_ms must be at least 1".to_string(),
            ));
        }
        if self.telemetry_ms == 0 {
            return Err(SimulatorError::InvalidScenario(
                "telemetry_ms must be at least 1".to_string(),
            ));
        }
        if !(self.max_drive_speed_ips > 0.0 && self.max_turn_rate_dps > 0.0) {
            return Err(SimulatorError::InvalidScenario(
                "drive and turn rates must be positive".to_string(),
            ));
        }
        if self.distance_noise_mm < 0.0 {
            return Err(SimulatorError::InvalidScenario(
                "distance noise must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
