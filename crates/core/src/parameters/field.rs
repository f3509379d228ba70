//! Field geometry parameters

use super::error::ParameterError;

/// Default field side length in inches
pub const DEFAULT_FIELD_SIZE_IN: f32 = 140.0;

/// Field geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Side length of the square field in inches
    pub field_size_in: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            field_size_in: DEFAULT_FIELD_SIZE_IN,
        }
    }
}

impl FieldParams {
    /// Distance from the field center to any wall.
    ///
    /// A sensor reading below this is considered adjacent to that wall.
    pub fn half_field_in(&self) -> f32 {
        self.field_size_in / 2.0
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.field_size_in > 0.0) || !self.field_size_in.is_finite() {
            return Err(ParameterError::OutOfRange {
                name: "FIELD_SIZE_IN",
            });
        }
        Ok(())
    }
}
