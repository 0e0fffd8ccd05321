//! Route handlers organized by resource

pub mod health;
pub mod homes;
pub mod rooms;
pub mod sensors;
pub mod measurement_types;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support {
    //! Router + in-memory database for handler tests

    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use crate::db::create_memory_pool;
    use crate::http::server::{build_router, AppState};
    use crate::models::PollInterval;
    use crate::sensor::HttpSensorClient;

    pub async fn app() -> (Router, SqlitePool) {
        let pool = create_memory_pool().await.expect("memory pool");
        let client = HttpSensorClient::new(Duration::from_secs(2)).expect("client");
        let state = AppState {
            pool: pool.clone(),
            client: Arc::new(client),
            default_interval: PollInterval::DEFAULT,
        };
        (build_router(state, false), pool)
    }

    /// Send a request, returning status and parsed JSON body (Null when empty).
    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// POST a home, room and sensor; returns the sensor id.
    pub async fn seed_sensor(app: &Router, url: &str, relay_url: Option<&str>) -> i64 {
        let (_, home) = send(app, "POST", "/homes", Some(serde_json::json!({"name": "Home"}))).await;
        let (_, room) = send(
            app,
            "POST",
            &format!("/homes/{}/rooms", home["id"]),
            Some(serde_json::json!({"name": "Office"})),
        )
        .await;
        let (status, sensor) = send(
            app,
            "POST",
            &format!("/rooms/{}/sensors", room["id"]),
            Some(serde_json::json!({"name": "Desk", "url": url, "relay_url": relay_url})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        sensor["id"].as_i64().unwrap()
    }
}
