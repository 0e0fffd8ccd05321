//! Polling interval

use std::time::Duration;

use super::ValidationError;

const MIN_SECS: u64 = 5;
const MAX_SECS: u64 = 86_400;

/// Seconds between two polling cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollInterval(u64);

impl PollInterval {
    pub const DEFAULT: PollInterval = PollInterval(60);

    /// Accepts 5 seconds up to one day.
    pub fn from_secs(secs: u64) -> Result<Self, ValidationError> {
        if !(MIN_SECS..=MAX_SECS).contains(&secs) {
            return Err(ValidationError::OutOfRange {
                field: "poll interval",
                min: MIN_SECS,
                max: MAX_SECS,
            });
        }
        Ok(Self(secs))
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}
