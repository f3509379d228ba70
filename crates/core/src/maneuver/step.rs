//! Maneuver step types

use crate::localization::{mirror_heading, Pose};

/// Motor speed cap for the motion controller (out of 127)
pub const DEFAULT_MAX_SPEED: f32 = 127.0;

/// Options for a move-to-pose motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    /// Drive forwards (`false` = reverse into the target)
    pub forwards: bool,
    pub max_speed: f32,
    pub min_speed: f32,
}

impl MoveParams {
    pub const fn new(forwards: bool, max_speed: f32, min_speed: f32) -> Self {
        Self {
            forwards,
            max_speed,
            min_speed,
        }
    }
}

impl Default for MoveParams {
    fn default() -> Self {
        Self::new(true, DEFAULT_MAX_SPEED, 0.0)
    }
}

/// Options for a turn-to-heading motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnParams {
    pub max_speed: f32,
    pub min_speed: f32,
}

impl TurnParams {
    pub const fn new(max_speed: f32, min_speed: f32) -> Self {
        Self {
            max_speed,
            min_speed,
        }
    }
}

impl Default for TurnParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPEED, 0.0)
    }
}

/// One step of a scripted maneuver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Start turning in place to a heading (degrees)
    TurnToHeading {
        heading: f32,
        timeout_ms: u32,
        params: TurnParams,
    },
    /// Start driving to a pose
    MoveToPose {
        target: Pose,
        timeout_ms: u32,
        params: MoveParams,
    },
    /// Block until the current motion has traveled this far (inches)
    WaitUntilTravel { distance_in: f32 },
    /// Block until the current motion finishes or times out
    WaitUntilDone,
    /// Move the lift by an encoder delta
    LiftRelative { ticks: f32, rpm: i16 },
    /// Extend or retract the redirect pneumatic
    SetRedirect(bool),
}

impl Step {
    /// Same step with the field reflected across the x axis.
    ///
    /// Headings and y coordinates change; x, timeouts, speed caps,
    /// distances and actuator steps do not.
    pub fn mirrored(&self) -> Self {
        match *self {
            Step::TurnToHeading {
                heading,
                timeout_ms,
                params,
            } => Step::TurnToHeading {
                heading: mirror_heading(heading),
                timeout_ms,
                params,
            },
            Step::MoveToPose {
                target,
                timeout_ms,
                params,
            } => Step::MoveToPose {
                target: target.mirrored(),
                timeout_ms,
                params,
            },
            other => other,
        }
    }

    /// True for the steps that block on the motion controller
    pub fn is_wait(&self) -> bool {
        matches!(self, Step::WaitUntilTravel { .. } | Step::WaitUntilDone)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::TurnToHeading { .. } => "turn",
            Step::MoveToPose { .. } => "move",
            Step::WaitUntilTravel { .. } => "wait_travel",
            Step::WaitUntilDone => "wait_done",
            Step::LiftRelative { .. } => "lift",
            Step::SetRedirect(_) => "redirect",
        }
    }
}
