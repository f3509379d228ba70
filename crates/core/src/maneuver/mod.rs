//! Scripted maneuvers
//!
//! A maneuver is a fixed list of [`Step`]s run by a small interpreter
//! ([`player::play`]) against a [`MotionController`] and the robot's
//! [`Actuators`](crate::actuator::Actuators).
//!
//! Scripts are data: the right-side script is produced from the left-side
//! one by [`script::mirror`], not written out a second time.
//!
//! # Blocking model
//!
//! The motion controller runs its own control loop. From the script's
//! point of view every wait step blocks until the controller reports the
//! condition met or its own timeout expired. A timed-out wait is recorded
//! in the [`PlaybackReport`] and the script continues with the next step.

pub mod motion;
pub mod player;
pub mod script;
pub mod step;

pub use motion::{MockMotion, MotionCall, MotionController, WaitOutcome};
pub use player::{play, PlaybackReport, MAX_RECORDED_TIMEOUTS};
pub use script::{mirror, script_for, Script, LEFT_BACK, SCRIPT_LEN};
pub use step::{MoveParams, Step, TurnParams};
