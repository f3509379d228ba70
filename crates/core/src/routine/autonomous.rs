//! Autonomous routine
//!
//! Reads the wall distances once, works out which corner the robot was
//! placed in, seeds odometry with the matching pose and plays that
//! corner's script. An unresolved corner leaves odometry untouched and
//! runs nothing.

use crate::actuator::{ActuatorError, Actuators};
use crate::localization::{estimate, CornerEstimate};
use crate::maneuver::{play, script_for, MotionController, PlaybackReport};
use crate::parameters::RobotParams;
use crate::sensing::{RawDistances, WallDistances};

/// What the autonomous routine did
#[derive(Debug, Clone, PartialEq)]
pub struct AutonomousReport {
    pub estimate: CornerEstimate,
    /// `None` when the corner has no script
    pub playback: Option<PlaybackReport>,
}

/// Run the autonomous period from a single distance sample.
pub fn run_autonomous(
    raw: &RawDistances,
    params: &RobotParams,
    motion: &mut dyn MotionController,
    actuators: &mut dyn Actuators,
) -> Result<AutonomousReport, ActuatorError> {
    let walls = WallDistances::from_raw(raw, &params.distance);
    let estimate = estimate(&walls, &params.field);

    if let Some(pose) = estimate.pose {
        motion.set_pose(pose)?;
    }

    let playback = match script_for(estimate.corner) {
        Some(script) => Some(play(&script, motion, actuators)?),
        None => None,
    };

    Ok(AutonomousReport { estimate, playback })
}
