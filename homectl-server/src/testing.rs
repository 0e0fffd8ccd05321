//! Test helpers: an in-process sensor device

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug)]
struct StubState {
    status: u16,
    payload: Value,
    relay_status: u16,
    relay_commands: Vec<String>,
    data_requests: usize,
}

/// Sensor device served by axum on an ephemeral localhost port.
///
/// `GET /data` answers with the configured status and payload,
/// `GET /relay/{state}` records the command.
#[derive(Clone)]
pub struct StubSensor {
    addr: SocketAddr,
    state: Arc<Mutex<StubState>>,
}

impl StubSensor {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState {
            status: 200,
            payload: json!({"temperature": 20.0}),
            relay_status: 200,
            relay_commands: Vec::new(),
            data_requests: 0,
        }));

        let app = Router::new()
            .route("/data", get(data))
            .route("/relay/{command}", get(relay))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub sensor");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn data_url(&self) -> String {
        format!("http://{}/data", self.addr)
    }

    pub fn relay_url(&self) -> String {
        format!("http://{}/relay", self.addr)
    }

    pub async fn set_payload(&self, payload: Value) {
        self.state.lock().await.payload = payload;
    }

    pub async fn set_status(&self, status: u16) {
        self.state.lock().await.status = status;
    }

    pub async fn set_relay_status(&self, status: u16) {
        self.state.lock().await.relay_status = status;
    }

    pub async fn relay_commands(&self) -> Vec<String> {
        self.state.lock().await.relay_commands.clone()
    }

    pub async fn data_requests(&self) -> usize {
        self.state.lock().await.data_requests
    }
}

async fn data(State(state): State<Arc<Mutex<StubState>>>) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.data_requests += 1;
    let status = StatusCode::from_u16(state.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(state.payload.clone()))
}

async fn relay(
    State(state): State<Arc<Mutex<StubState>>>,
    Path(command): Path<String>,
) -> StatusCode {
    let mut state = state.lock().await;
    let status = StatusCode::from_u16(state.relay_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_success() {
        state.relay_commands.push(command);
    }
    status
}
