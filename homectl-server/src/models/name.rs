//! Names of homes, rooms, sensors and measurement units

use super::ValidationError;

/// Maximum length for home, room, sensor and measurement type names
const MAX_NAME_LEN: usize = 128;

/// Maximum length for a measurement unit
const MAX_UNIT_LEN: usize = 32;

/// Validated display name for a home, room or sensor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// Create a new name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 128 characters
    ///
    /// # Example
    /// ```
    /// use homectl_server::models::EntityName;
    ///
    /// assert!(EntityName::new("Living room").is_ok());
    /// assert!(EntityName::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unit label of a measurement type (e.g. `°C`, `%`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit(String);

impl Unit {
    /// Unit assigned to measurement types discovered while polling.
    pub const PLACEHOLDER: &'static str = "unit";

    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "unit" });
        }

        if trimmed.chars().count() > MAX_UNIT_LEN {
            return Err(ValidationError::TooLong {
                field: "unit",
                max: MAX_UNIT_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = EntityName::new("  Kitchen ").unwrap();
        assert_eq!(name.as_str(), "Kitchen");
    }

    #[test]
    fn rejects_empty() {
        let err = EntityName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = EntityName::new(" \t ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length_counts_chars() {
        // multi-byte characters count once
        let name_128 = "ä".repeat(128);
        assert!(EntityName::new(&name_128).is_ok());

        let name_129 = "a".repeat(129);
        let err = EntityName::new(&name_129).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn units() {
        assert_eq!(Unit::new(" °C ").unwrap().as_str(), "°C");
        assert!(Unit::new("").is_err());
        assert!(Unit::new(&"x".repeat(33)).is_err());
    }
}
