//! Match routines

pub mod autonomous;

pub use autonomous::{run_autonomous, AutonomousReport};
