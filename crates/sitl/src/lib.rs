//! corner_pilot_sitl - Software-in-the-loop simulator
//!
//! Runs the `corner_pilot_core` control logic against a simulated robot:
//! a kinematic drivetrain and lift, synthesized distance sensors, and a
//! lockstep motion controller. Scenarios are JSON files describing where
//! the robot is placed and what the operator does.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod motion;
pub mod robot;
pub mod runner;
pub mod scenario;

pub use clock::SimClock;
pub use config::SimConfig;
pub use error::SimulatorError;
pub use motion::SimMotion;
pub use robot::{LiftDrive, SharedRobot, SimRobot, StepMotion};
pub use runner::{run, RunSummary, Snapshot};
pub use scenario::{Button, InputFrame, Placement, Scenario};
