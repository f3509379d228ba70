//! Field pose
//!
//! Field frame: origin at the field center, x and y in inches, heading in
//! degrees clockwise from +y in the range [0, 360).

/// Robot position and heading on the field
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    /// X position in inches
    pub x: f32,
    /// Y position in inches
    pub y: f32,
    /// Heading in degrees (0-360)
    pub heading: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_heading(heading),
        }
    }

    /// Reflect across the x axis (y -> -y)
    ///
    /// Used to derive right-side poses from left-side ones.
    pub fn mirrored(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            heading: mirror_heading(self.heading),
        }
    }
}

/// Wrap a heading into [0, 360)
pub fn normalize_heading(heading: f32) -> f32 {
    let a = heading % 360.0;
    let a = if a < 0.0 { a + 360.0 } else { a };
    // -0.0001 % 360 + 360 rounds to 360.0 in f32
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Heading after reflecting the field across the x axis.
///
/// With headings measured clockwise from +y, the direction vector
/// (sin h, cos h) becomes (sin h, -cos h), which is heading 180 - h.
pub fn mirror_heading(heading: f32) -> f32 {
    normalize_heading(180.0 - heading)
}
