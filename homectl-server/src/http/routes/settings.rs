//! Settings endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::SettingsRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::PollInterval;

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    pub poll_interval_secs: u64,
}

/// GET /settings
async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<Settings>, ApiError> {
    let interval = SettingsRepo::new(&state.pool)
        .poll_interval(state.default_interval)
        .await?;
    Ok(Json(Settings {
        poll_interval_secs: interval.as_secs(),
    }))
}

/// PUT /settings - applied by the poller from its next wait on
async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let interval = PollInterval::from_secs(req.poll_interval_secs)?;
    SettingsRepo::new(&state.pool).set_poll_interval(interval).await?;
    Ok(Json(Settings {
        poll_interval_secs: interval.as_secs(),
    }))
}

/// Settings routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(put_settings))
}
