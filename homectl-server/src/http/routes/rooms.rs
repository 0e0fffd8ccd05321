//! Room endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::{RoomRepo, Sensor, SensorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::{EntityName, SensorUrl};

/// Create sensor request
#[derive(Deserialize)]
pub struct CreateSensorRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub relay_url: Option<String>,
}

/// DELETE /rooms/{id} - cascades to sensors and measurements
async fn delete_room(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<StatusCode, ApiError> {
    RoomRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /rooms/{id}/sensors
async fn create_sensor(
    State(state): State<Arc<AppState>>,
    RowId(room_id): RowId,
    Json(req): Json<CreateSensorRequest>,
) -> Result<(StatusCode, Json<Sensor>), ApiError> {
    let name = EntityName::new(&req.name)?;
    let url = SensorUrl::new(&req.url)?;
    let relay_url = req
        .relay_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .map(SensorUrl::new)
        .transpose()?;

    let sensor = SensorRepo::new(&state.pool)
        .create(room_id, name, url, relay_url)
        .await?;
    Ok((StatusCode::CREATED, Json(sensor)))
}

/// Room routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms/{id}", delete(delete_room))
        .route("/rooms/{id}/sensors", post(create_sensor))
}
