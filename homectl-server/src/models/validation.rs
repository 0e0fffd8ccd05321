//! Validation error types

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// e.g. a URL without an http(s) scheme
    #[error("{field}: {reason}")]
    InvalidFormat { field: &'static str, reason: &'static str },

    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: u64, max: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 128 characters"
        );

        let err = ValidationError::OutOfRange {
            field: "poll interval",
            min: 5,
            max: 86_400,
        };
        assert_eq!(err.to_string(), "poll interval must be between 5 and 86400");
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ValidationError::Empty { field: "unit" });
        assert_eq!(err.to_string(), "unit cannot be empty");
    }
}
