// crates/core/src/error.rs
use thiserror::Error;

/// Errors produced while validating a submitted payload.
///
/// Every variant names the offending field so the HTTP layer can echo it
/// back to the client unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("invalid {field} format, expected ISO-8601 timestamp: {message}")]
    MalformedTimestamp {
        field: &'static str,
        message: String,
    },

    #[error("end_time must be after start_time")]
    OrderingViolation,
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// The payload field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::MalformedTimestamp { field, .. } => *field,
            Self::OrderingViolation => "end_time",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ValidationError::missing("category");
        assert_eq!(err.to_string(), "category is required");
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn test_malformed_timestamp_display_echoes_parser() {
        let err = ValidationError::MalformedTimestamp {
            field: "start_time",
            message: "input contains invalid characters".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("invalid start_time format"));
        assert!(msg.ends_with("input contains invalid characters"));
    }

    #[test]
    fn test_ordering_violation_points_at_end_time() {
        let err = ValidationError::OrderingViolation;
        assert_eq!(err.to_string(), "end_time must be after start_time");
        assert_eq!(err.field(), "end_time");
    }
}
