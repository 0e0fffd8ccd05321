//! reqwest-backed sensor client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use super::{relay_command_url, SensorClient, SensorError};
use crate::models::RelayState;

/// Default timeout for a single sensor request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sensor client talking HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpSensorClient {
    client: Client,
}

impl HttpSensorClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homectl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl SensorClient for HttpSensorClient {
    async fn fetch(&self, url: &str) -> Result<Map<String, Value>, SensorError> {
        tracing::debug!(%url, "fetching sensor data");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SensorError::Request {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SensorError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| SensorError::Payload {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        match body {
            Value::Object(map) => Ok(map),
            other => Err(SensorError::Payload {
                url: url.to_owned(),
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    async fn switch_relay(&self, relay_url: &str, state: RelayState) -> Result<(), SensorError> {
        let url = relay_command_url(relay_url, state)?;
        tracing::debug!(%url, %state, "switching relay");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SensorError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SensorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubSensor;

    #[tokio::test]
    async fn fetch_returns_object() {
        let stub = StubSensor::start().await;
        stub.set_payload(serde_json::json!({"temperature": 21.5})).await;

        let client = HttpSensorClient::with_default_timeout().unwrap();
        let map = client.fetch(&stub.data_url()).await.unwrap();
        assert_eq!(map.get("temperature"), Some(&serde_json::json!(21.5)));
    }

    #[tokio::test]
    async fn fetch_rejects_non_200() {
        let stub = StubSensor::start().await;
        stub.set_status(503).await;

        let client = HttpSensorClient::with_default_timeout().unwrap();
        let err = client.fetch(&stub.data_url()).await.unwrap_err();
        assert!(matches!(err, SensorError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn fetch_rejects_non_object() {
        let stub = StubSensor::start().await;
        stub.set_payload(serde_json::json!([1, 2, 3])).await;

        let client = HttpSensorClient::with_default_timeout().unwrap();
        let err = client.fetch(&stub.data_url()).await.unwrap_err();
        match err {
            SensorError::Payload { reason, .. } => assert!(reason.contains("an array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_unreachable_is_request_error() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpSensorClient::new(Duration::from_secs(2)).unwrap();
        let err = client.fetch(&format!("http://{addr}/data")).await.unwrap_err();
        assert!(matches!(err, SensorError::Request { .. }));
    }

    #[tokio::test]
    async fn switch_relay_hits_suffix() {
        let stub = StubSensor::start().await;
        let client = HttpSensorClient::with_default_timeout().unwrap();

        client.switch_relay(&stub.relay_url(), RelayState::On).await.unwrap();
        client.switch_relay(&stub.relay_url(), RelayState::Off).await.unwrap();

        assert_eq!(stub.relay_commands().await, vec!["on", "off"]);
    }

    #[tokio::test]
    async fn switch_relay_keeps_query_string() {
        let stub = StubSensor::start().await;
        let client = HttpSensorClient::with_default_timeout().unwrap();

        let relay_url = format!("{}?token=abc", stub.relay_url());
        client.switch_relay(&relay_url, RelayState::On).await.unwrap();

        assert_eq!(stub.relay_commands().await, vec!["on"]);
    }
}
