//! corner_pilot_core - Pure no_std decision logic for the corner_pilot robot
//!
//! This crate contains the parts of the robot program that make decisions:
//! where the robot starts on the field, which scripted maneuver to run from
//! there, and how the timed lift and ejection macros take control of the
//! actuators away from the driver and hand it back.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Motion controller, actuators and time are
//!   injected via traits so every state machine runs on the host in tests
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic time source
//! - [`timer`]: Pausable countdown timer driven by injected time
//! - [`parameters`]: Build-time parameter blocks with validation
//! - [`sensing`]: Distance normalization and telemetry sampling
//! - [`localization`]: Corner estimation and initial pose
//! - [`actuator`]: Actuator interface and error type
//! - [`maneuver`]: Scripted maneuver steps, scripts and player
//! - [`control`]: Manual-operation tick, lift macros and ejection chain
//! - [`routine`]: Autonomous routine entry point

#![no_std]

// Host test harness (proptest, format!) needs std
#[cfg(test)]
extern crate std;

pub mod actuator;
pub mod control;
pub mod localization;
pub mod maneuver;
pub mod parameters;
pub mod routine;
pub mod sensing;
pub mod timer;
pub mod traits;

pub use actuator::{ActuatorError, Actuators};
pub use localization::{Corner, Pose};
pub use timer::Timer;
