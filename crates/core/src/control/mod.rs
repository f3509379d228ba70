//! Manual operation
//!
//! [`OperatorControl::tick`] is called once per control loop iteration with
//! the controller state and a sensor snapshot. It owns the session toggles,
//! the two lift macros and the ejection chain, and writes the resulting
//! commands to the actuators.
//!
//! Within a tick the order is fixed: button edges, toggles, lift macro,
//! ejection chain, redirect toggle, then actuator writes and telemetry.

pub mod ejection;
pub mod input;
pub mod lift_macro;
pub mod operator;
pub mod session;

pub use ejection::{EjectionChain, EjectionState};
pub use input::{ButtonEdges, Buttons, ControllerInput, SensorSnapshot};
pub use lift_macro::{LiftCommand, LiftMacroSequencer, MacroState};
pub use operator::{OperatorControl, TickReport};
pub use session::SessionState;
