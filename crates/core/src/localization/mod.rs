//! Initial localization
//!
//! Turns four calibrated wall distances into a starting corner and an
//! initial field pose. This runs once at the start of the autonomous
//! routine; there is no continuous localization after that.

pub mod corner;
pub mod pose;

pub use corner::{classify, estimate, Corner, CornerEstimate, CornerFlags, CornerRule, CORNER_RULES};
pub use pose::{mirror_heading, normalize_heading, Pose};
