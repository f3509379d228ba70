//! Parameter error types

/// Errors from parameter validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// A single value lies outside its accepted range
    OutOfRange { name: &'static str },
    /// Two values contradict each other
    Inconsistent { reason: &'static str },
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::OutOfRange { name } => write!(f, "parameter {} out of range", name),
            ParameterError::Inconsistent { reason } => {
                write!(f, "inconsistent parameters: {}", reason)
            }
        }
    }
}

impl core::error::Error for ParameterError {}
