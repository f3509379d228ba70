//! Core traits for platform-agnostic robot logic.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (simulator clock, robot brain clock) live
//!   outside this crate

pub mod time;

pub use time::{MockTime, TimeSource};
