//! Sensor device client
//!
//! Sensors are HTTP devices: the data endpoint answers GET with a JSON
//! object of readings, the optional relay endpoint is switched by a GET to
//! `{relay_url}/on` or `{relay_url}/off`.

mod client;

pub use client::HttpSensorClient;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Map, Value};

use crate::models::RelayState;

/// Failure talking to a sensor
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an invalid payload: {reason}")]
    Payload { url: String, reason: String },

    #[error("sensor has no relay endpoint")]
    NoRelay,

    #[error("invalid relay url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Access to sensor devices
#[async_trait]
pub trait SensorClient: Send + Sync {
    /// Fetch the current readings of a sensor's data endpoint.
    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, SensorError>;

    /// Switch a relay to `state`.
    async fn switch_relay(&self, relay_url: &str, state: RelayState) -> Result<(), SensorError>;
}

/// URL that switches a relay: the state appended as the last path segment.
///
/// Query string and fragment of `relay_url` are kept in place.
pub fn relay_command_url(relay_url: &str, state: RelayState) -> Result<Url, SensorError> {
    let invalid = |reason: String| SensorError::InvalidUrl {
        url: relay_url.to_owned(),
        reason,
    };

    let mut url = Url::parse(relay_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("url cannot have a path".to_owned()))?
        .pop_if_empty()
        .push(state.as_suffix());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(relay_url: &str, state: RelayState) -> String {
        relay_command_url(relay_url, state).unwrap().to_string()
    }

    #[test]
    fn relay_url_suffix() {
        assert_eq!(command("http://plug.local/relay", RelayState::On), "http://plug.local/relay/on");
        assert_eq!(command("http://plug.local/relay/", RelayState::Off), "http://plug.local/relay/off");
        assert_eq!(command("http://plug.local", RelayState::On), "http://plug.local/on");
    }

    #[test]
    fn relay_url_keeps_query() {
        assert_eq!(
            command("http://plug.local/relay?token=abc", RelayState::On),
            "http://plug.local/relay/on?token=abc"
        );
    }

    #[test]
    fn relay_url_must_parse() {
        let err = relay_command_url("not a url", RelayState::Off).unwrap_err();
        assert!(matches!(err, SensorError::InvalidUrl { .. }));
    }
}
