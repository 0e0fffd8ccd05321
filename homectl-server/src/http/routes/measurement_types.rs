//! Measurement type endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::{MeasurementType, MeasurementTypeRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RowId;
use crate::http::server::AppState;
use crate::models::Unit;

#[derive(Deserialize)]
pub struct UpdateUnitRequest {
    pub unit: String,
}

/// GET /measurement-types
async fn list_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MeasurementType>>, ApiError> {
    let types = MeasurementTypeRepo::new(&state.pool).list().await?;
    Ok(Json(types))
}

/// PATCH /measurement-types/{id}
async fn update_unit(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
    Json(req): Json<UpdateUnitRequest>,
) -> Result<Json<MeasurementType>, ApiError> {
    let unit = Unit::new(&req.unit)?;
    let updated = MeasurementTypeRepo::new(&state.pool).set_unit(id, unit).await?;
    Ok(Json(updated))
}

/// Measurement type routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/measurement-types", get(list_types))
        .route("/measurement-types/{id}", axum::routing::patch(update_unit))
}
