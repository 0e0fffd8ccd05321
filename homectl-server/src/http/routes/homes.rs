//! Home endpoints, including the overview tree

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::{Home, HomeRepo, HomeTree, Room, RoomRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::EntityName;

/// Create home / room request
#[derive(Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// GET /homes - every home with rooms and sensors
async fn list_homes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<HomeTree>>, ApiError> {
    let homes = HomeRepo::new(&state.pool).list_tree().await?;
    Ok(Json(homes))
}

/// POST /homes
async fn create_home(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<Home>), ApiError> {
    let name = EntityName::new(&req.name)?;
    let home = HomeRepo::new(&state.pool).create(name).await?;
    Ok((StatusCode::CREATED, Json(home)))
}

/// GET /homes/{id}
async fn get_home(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<Json<Home>, ApiError> {
    let home = HomeRepo::new(&state.pool).get(id).await?;
    Ok(Json(home))
}

/// DELETE /homes/{id} - cascades to rooms, sensors, measurements
async fn delete_home(State(state): State<Arc<AppState>>, RowId(id): RowId) -> Result<StatusCode, ApiError> {
    HomeRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /homes/{id}/rooms
async fn create_room(
    State(state): State<Arc<AppState>>,
    RowId(home_id): RowId,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let name = EntityName::new(&req.name)?;
    let room = RoomRepo::new(&state.pool).create(home_id, name).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/homes", get(list_homes).post(create_home))
        .route("/homes/{id}", get(get_home).delete(delete_home))
        .route("/homes/{id}/rooms", post(create_room))
}
