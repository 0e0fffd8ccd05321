//! Sensor endpoint URLs

use reqwest::Url;

use super::ValidationError;

/// Absolute http(s) URL of a sensor data or relay endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorUrl(Url);

impl SensorUrl {
    /// Parse and validate an endpoint URL.
    ///
    /// # Example
    /// ```
    /// use homectl_server::models::SensorUrl;
    ///
    /// assert!(SensorUrl::new("http://192.168.1.40/data").is_ok());
    /// assert!(SensorUrl::new("ftp://192.168.1.40/data").is_err());
    /// assert!(SensorUrl::new("/data").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "url" });
        }

        let url = Url::parse(trimmed).map_err(|_| ValidationError::InvalidFormat {
            field: "url",
            reason: "must be an absolute URL",
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            _ => Err(ValidationError::InvalidFormat {
                field: "url",
                reason: "scheme must be http or https",
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0.into()
    }
}
