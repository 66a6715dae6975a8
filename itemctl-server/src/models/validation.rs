//! Validation error types

use std::fmt;

/// Where a request field was expected to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// JSON request body
    Body,
    /// URL query string
    Query,
}

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent (or empty) in its source
    Missing {
        field: &'static str,
        source: FieldSource,
    },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field present but of the wrong shape
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                field,
                source: FieldSource::Body,
            } => write!(f, "Missing '{}' in request body", field),
            Self::Missing {
                field,
                source: FieldSource::Query,
            } => write!(f, "Missing '{}' parameter in URL", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_messages_name_the_source() {
        let body = ValidationError::Missing {
            field: "text",
            source: FieldSource::Body,
        };
        assert_eq!(body.to_string(), "Missing 'text' in request body");

        let query = ValidationError::Missing {
            field: "text",
            source: FieldSource::Query,
        };
        assert_eq!(query.to_string(), "Missing 'text' parameter in URL");
    }

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "text",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "text exceeds maximum length of 255 characters"
        );
    }
}
