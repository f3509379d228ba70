//! Scenario files
//!
//! A scenario places the robot on the field and scripts the operator. Input
//! frames are piecewise constant: each frame holds until the next one, so a
//! single button press is a frame with the button followed by one without.
//!
//! ```json
//! {
//!   "name": "raise then eject",
//!   "placement": { "x": -5.0, "y": -10.0, "heading": 0.0 },
//!   "duration_ms": 3000,
//!   "inputs": [
//!     { "at_ms": 0, "buttons": ["sort"] },
//!     { "at_ms": 20, "forward": 60 },
//!     { "at_ms": 500, "buttons": ["lift_raise"] },
//!     { "at_ms": 520 }
//!   ],
//!   "rings_ms": [1000]
//! }
//! ```

use std::path::Path;

use corner_pilot_core::control::{Buttons, ControllerInput};
use corner_pilot_core::parameters::FieldParams;
use corner_pilot_core::Pose;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::SimulatorError;

/// How long a ring stays in front of the sort sensor.
pub const RING_DWELL_MS: u64 = 100;

/// Controller button names used in scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    ReverseDrive,
    IntakeOut,
    IntakeIn,
    Grab,
    IntakeLift,
    LiftLower,
    LiftRaise,
    Sort,
    Redirect,
}

impl Button {
    pub fn flag(self) -> Buttons {
        match self {
            Button::ReverseDrive => Buttons::REVERSE_DRIVE,
            Button::IntakeOut => Buttons::INTAKE_OUT,
            Button::IntakeIn => Buttons::INTAKE_IN,
            Button::Grab => Buttons::GRAB,
            Button::IntakeLift => Buttons::INTAKE_LIFT,
            Button::LiftLower => Buttons::LIFT_LOWER,
            Button::LiftRaise => Buttons::LIFT_RAISE,
            Button::Sort => Buttons::SORT,
            Button::Redirect => Buttons::REDIRECT,
        }
    }
}

/// Where the robot is physically placed at the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl Placement {
    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.heading)
    }
}

/// Controller state from `at_ms` until the next frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub at_ms: u64,
    #[serde(default)]
    pub forward: i16,
    #[serde(default)]
    pub turn: i16,
    #[serde(default)]
    pub lift: i16,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl InputFrame {
    pub fn to_input(&self) -> ControllerInput {
        ControllerInput {
            forward: self.forward,
            turn: self.turn,
            lift: self.lift,
            buttons: self
                .buttons
                .iter()
                .fold(Buttons::empty(), |acc, b| acc | b.flag()),
        }
    }
}

/// A complete simulation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub placement: Placement,
    /// Run the autonomous routine before manual operation.
    #[serde(default)]
    pub autonomous: bool,
    /// Length of the manual-operation phase.
    pub duration_ms: u64,
    #[serde(default)]
    pub inputs: Vec<InputFrame>,
    /// Times at which a ring reaches the sort sensor.
    #[serde(default)]
    pub rings_ms: Vec<u64>,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Scenario {
    /// Parse and validate a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SimulatorError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Scenario with no operator input, placed at `placement`.
    pub fn idle(placement: Placement, duration_ms: u64) -> Self {
        Self {
            name: String::from("idle"),
            placement,
            autonomous: false,
            duration_ms,
            inputs: Vec::new(),
            rings_ms: Vec::new(),
            sim: SimConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        let half = FieldParams::default().half_field_in();
        let p = &self.placement;
        if !(p.x.abs() < half && p.y.abs() < half) || !p.heading.is_finite() {
            return Err(SimulatorError::InvalidScenario(format!(
                "placement ({}, {}) is off the field",
                p.x, p.y
            )));
        }
        if self.inputs.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
            return Err(SimulatorError::InvalidScenario(
                "input frames must be in time order".to_string(),
            ));
        }
        self.sim.validate()
    }

    /// Controller state at time `t_ms` of the manual phase.
    pub fn input_at(&self, t_ms: u64) -> ControllerInput {
        self.inputs
            .iter()
            .take_while(|frame| frame.at_ms <= t_ms)
            .last()
            .map(InputFrame::to_input)
            .unwrap_or_default()
    }

    /// True while a ring sits in front of the sort sensor.
    pub fn ring_present(&self, t_ms: u64) -> bool {
        self.rings_ms
            .iter()
            .any(|&at| t_ms >= at && t_ms < at + RING_DWELL_MS)
    }
}
