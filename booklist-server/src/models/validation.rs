//! Validation error types

use std::fmt;

/// Input that could not be coerced into the expected type
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Path segment is not a valid value for the field
    InvalidFormat { field: &'static str, value: String },

    /// Request body could not be decoded
    Body { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, value } => {
                write!(f, "invalid {}: '{}' is not an integer", field, value)
            }
            Self::Body { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
