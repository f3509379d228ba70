//! Autonomous maneuver scripts
//!
//! Coordinates are field inches, headings degrees clockwise from +y.

use crate::localization::{Corner, Pose};

use super::step::{MoveParams, Step, TurnParams};

/// Number of steps in a corner script
pub const SCRIPT_LEN: usize = 26;

/// Fixed-length step list
pub type Script = [Step; SCRIPT_LEN];

/// Timeout applied to every motion in the corner scripts
const MOTION_TIMEOUT_MS: u32 = 4000;

/// Lift delta to raise onto a stake
const LIFT_UP_TICKS: f32 = 700.0;
/// Lift delta to score
const LIFT_DOWN_TICKS: f32 = -550.0;
const LIFT_RPM: i16 = 200;

const fn turn(heading: f32, max_speed: f32, min_speed: f32) -> Step {
    Step::TurnToHeading {
        heading,
        timeout_ms: MOTION_TIMEOUT_MS,
        params: TurnParams::new(max_speed, min_speed),
    }
}

const fn move_to(x: f32, y: f32, heading: f32, params: MoveParams) -> Step {
    Step::MoveToPose {
        target: Pose { x, y, heading },
        timeout_ms: MOTION_TIMEOUT_MS,
        params,
    }
}

const fn travel(distance_in: f32) -> Step {
    Step::WaitUntilTravel { distance_in }
}

const fn lift(ticks: f32) -> Step {
    Step::LiftRelative {
        ticks,
        rpm: LIFT_RPM,
    }
}

const DONE: Step = Step::WaitUntilDone;

/// Script for a robot that starts in the left-back corner.
pub const LEFT_BACK: Script = [
    turn(340.0, 50.0, 30.0),
    DONE,
    move_to(-60.0, -13.0, 330.0, MoveParams::new(true, 80.0, 40.0)),
    travel(1.0),
    lift(LIFT_UP_TICKS),
    Step::SetRedirect(true),
    DONE,
    move_to(-66.0, -2.0, 325.0, MoveParams::new(true, 80.0, 40.0)),
    travel(10.0),
    lift(LIFT_DOWN_TICKS),
    DONE,
    move_to(-48.0, -20.0, 315.0, MoveParams::new(false, 127.0, 100.0)),
    travel(1.0),
    lift(LIFT_DOWN_TICKS),
    DONE,
    turn(300.0, 50.0, 30.0),
    DONE,
    move_to(-30.0, -12.0, 260.0, MoveParams::new(false, 80.0, 50.0)),
    travel(1.0),
    lift(LIFT_UP_TICKS),
    DONE,
    move_to(-14.0, -28.0, 330.0, MoveParams::new(false, 80.0, 50.0)),
    DONE,
    turn(335.0, 50.0, 20.0),
    DONE,
    Step::SetRedirect(false),
];

/// Reflect every step of a script across the x axis.
pub fn mirror<const N: usize>(steps: &[Step; N]) -> [Step; N] {
    core::array::from_fn(|i| steps[i].mirrored())
}

/// Script to run from a corner, if that corner has one.
pub fn script_for(corner: Corner) -> Option<Script> {
    match corner {
        Corner::LeftBack => Some(LEFT_BACK),
        Corner::RightBack => Some(mirror(&LEFT_BACK)),
        _ => None,
    }
}
