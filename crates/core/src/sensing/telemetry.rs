//! Distance telemetry sampling
//!
//! During manual operation the calibrated wall distances are reported on a
//! fixed period so the drive team can check sensor placement. Sampling is
//! suppressed while the inertial sensor is still calibrating.

use crate::parameters::DistanceParams;
use crate::timer::Timer;

use super::distance::{RawDistances, WallDistances};

/// One telemetry report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReport {
    /// Time the report was taken (ms)
    pub timestamp_ms: u64,
    /// Calibrated wall distances
    pub walls: WallDistances,
}

/// Periodic distance sampler
#[derive(Debug, Clone, Copy)]
pub struct DistanceTelemetry {
    period: Timer,
}

impl DistanceTelemetry {
    /// Create a sampler whose first report is due one period after `now_ms`
    pub fn new(period_ms: u32, now_ms: u64) -> Self {
        Self {
            period: Timer::started(period_ms, now_ms),
        }
    }

    /// Produce a report if the period elapsed and the IMU is ready.
    ///
    /// The period restarts only when a report is produced.
    pub fn sample(
        &mut self,
        now_ms: u64,
        imu_calibrating: bool,
        raw: &RawDistances,
        params: &DistanceParams,
    ) -> Option<DistanceReport> {
        if !self.period.is_done(now_ms) || imu_calibrating {
            return None;
        }

        self.period.reset(now_ms);
        Some(DistanceReport {
            timestamp_ms: now_ms,
            walls: WallDistances::from_raw(raw, params),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawDistances {
        RawDistances {
            left_mm: 254.0,
            right_mm: 254.0,
            front_mm: 254.0,
            back_mm: 254.0,
        }
    }

    #[test]
    fn test_report_after_period() {
        let params = DistanceParams::default();
        let mut telemetry = DistanceTelemetry::new(20, 0);

        assert!(telemetry.sample(19, false, &raw(), &params).is_none());
        let report = telemetry.sample(20, false, &raw(), &params).unwrap();
        assert_eq!(report.timestamp_ms, 20);
        assert!((report.walls.left - 16.0).abs() < 1e-3);

        // Period restarted at 20
        assert!(telemetry.sample(39, false, &raw(), &params).is_none());
        assert!(telemetry.sample(40, false, &raw(), &params).is_some());
    }

    #[test]
    fn test_suppressed_while_imu_calibrating() {
        let params = DistanceParams::default();
        let mut telemetry = DistanceTelemetry::new(20, 0);

        assert!(telemetry.sample(100, true, &raw(), &params).is_none());
        // Due immediately once calibration finishes
        assert!(telemetry.sample(101, false, &raw(), &params).is_some());
    }
}
