//! Sensor endpoints: detail, history, manual poll, relay switch

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{Measurement, MeasurementRepo, Sensor, SensorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::{Property, RelayState, ValidationError};
use crate::poller::poll_sensor;
use crate::sensor::SensorError;

/// Timestamp format of history points
const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sensor with its latest measurement
#[derive(Serialize)]
pub struct SensorDetail {
    pub sensor: Sensor,
    pub latest: Option<Measurement>,
}

/// History query parameters
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub property: Option<String>,
    pub limit: Option<u32>,
}

/// One property's history, as parallel arrays ready for charting
#[derive(Serialize)]
pub struct HistoryResponse {
    pub sensor: Sensor,
    pub property: String,
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
}

/// Relay switch request; an empty body toggles the stored state
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub state: Option<String>,
}

#[derive(Serialize)]
pub struct RelayResponse {
    pub sensor: Sensor,
    pub state: RelayState,
}

/// GET /sensors/{id}
async fn get_sensor(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<Json<SensorDetail>, ApiError> {
    let sensor = SensorRepo::new(&state.pool).get(id).await?;
    let latest = MeasurementRepo::new(&state.pool).latest(id).await?;
    Ok(Json(SensorDetail { sensor, latest }))
}

/// DELETE /sensors/{id}
async fn delete_sensor(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<StatusCode, ApiError> {
    SensorRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /sensors/{id}/history?property=temperature&limit=100
async fn history(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let property = Property::from_query(params.property.as_deref())?;
    let sensor = SensorRepo::new(&state.pool).get(id).await?;
    let points = MeasurementRepo::new(&state.pool)
        .history(id, &property, params.limit)
        .await?;

    let (timestamps, values): (Vec<String>, Vec<f64>) = points
        .into_iter()
        .map(|p| (p.timestamp.format(HISTORY_TIME_FORMAT).to_string(), p.value))
        .unzip();

    Ok(Json(HistoryResponse {
        sensor,
        property: property.as_str().to_owned(),
        timestamps,
        values,
    }))
}

/// GET /sensors/{id}/properties
async fn properties(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<Json<Vec<String>>, ApiError> {
    SensorRepo::new(&state.pool).get(id).await?;
    let names = MeasurementRepo::new(&state.pool).properties(id).await?;
    Ok(Json(names))
}

/// POST /sensors/{id}/poll - fetch and record now
async fn poll_now(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<(StatusCode, Json<Measurement>), ApiError> {
    let sensor = SensorRepo::new(&state.pool).get(id).await?;
    let measurement = poll_sensor(&state.pool, state.client.as_ref(), &sensor).await?;
    Ok((StatusCode::CREATED, Json(measurement)))
}

/// POST /sensors/{id}/relay
async fn switch_relay(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
    body: Bytes,
) -> Result<Json<RelayResponse>, ApiError> {
    let requested = parse_relay_request(&body)?;

    let repo = SensorRepo::new(&state.pool);
    let sensor = repo.get(id).await?;
    let relay_url = sensor.relay_url.as_deref().ok_or(SensorError::NoRelay)?;

    let target = requested.unwrap_or_else(|| sensor.relay_state().unwrap_or(RelayState::Off).toggled());

    state.client.switch_relay(relay_url, target).await?;
    let sensor = repo.set_relay_state(id, target).await?;

    tracing::info!(sensor_id = id, state = %target, "relay switched");
    Ok(Json(RelayResponse { sensor, state: target }))
}

fn parse_relay_request(body: &[u8]) -> Result<Option<RelayState>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let req: RelayRequest = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidFormat {
        field: "body",
        reason: "expected JSON object like {\"state\": \"on\"}",
    })?;

    req.state.as_deref().map(str::parse).transpose()
}

/// Sensor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sensors/{id}", get(get_sensor).delete(delete_sensor))
        .route("/sensors/{id}/history", get(history))
        .route("/sensors/{id}/properties", get(properties))
        .route("/sensors/{id}/poll", post(poll_now))
        .route("/sensors/{id}/relay", post(switch_relay))
}
