//! Measurement property selected in history queries

use super::ValidationError;

/// Measurement type name to chart, `temperature` unless the caller asks otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property(String);

impl Property {
    pub const DEFAULT: &'static str = "temperature";

    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "property" });
        }
        Ok(Self(s.to_owned()))
    }

    /// Falls back to the default property when none is given.
    pub fn from_query(s: Option<&str>) -> Result<Self, ValidationError> {
        Self::new(s.unwrap_or(Self::DEFAULT))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
