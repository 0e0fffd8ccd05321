//! Sensor repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::{EntityName, RelayState, SensorUrl};

/// Sensor record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sensor {
    pub id: i64,
    pub name: String,
    /// Data endpoint returning a JSON object of readings
    pub url: String,
    /// Relay endpoint; `on`/`off` is appended to switch it
    pub relay_url: Option<String>,
    /// Last state the relay was switched to, unknown until first switched
    pub relay_on: Option<bool>,
    pub room_id: i64,
}

impl Sensor {
    pub fn relay_state(&self) -> Option<RelayState> {
        self.relay_on.map(RelayState::from_bool)
    }
}

const SENSOR_COLUMNS: &str = "id, name, url, relay_url, relay_on, room_id";

/// Sensor repository
pub struct SensorRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SensorRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a sensor in `room_id`; an unknown room is NotFound.
    pub async fn create(
        &self,
        room_id: i64,
        name: EntityName,
        url: SensorUrl,
        relay_url: Option<SensorUrl>,
    ) -> Result<Sensor, DbError> {
        let sensor = sqlx::query_as::<_, Sensor>(&format!(
            "INSERT INTO sensors (name, url, relay_url, room_id) VALUES (?, ?, ?, ?) RETURNING {SENSOR_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(url.as_str())
        .bind(relay_url.as_ref().map(SensorUrl::as_str))
        .bind(room_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, "room", room_id))?;

        tracing::info!(sensor_id = sensor.id, room_id, name = %sensor.name, url = %sensor.url, "sensor created");
        Ok(sensor)
    }

    pub async fn get(&self, id: i64) -> Result<Sensor, DbError> {
        sqlx::query_as::<_, Sensor>(&format!("SELECT {SENSOR_COLUMNS} FROM sensors WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("sensor", id))
    }

    /// Every sensor, in creation order (the polling order).
    pub async fn list_all(&self) -> Result<Vec<Sensor>, DbError> {
        let sensors = sqlx::query_as::<_, Sensor>(&format!("SELECT {SENSOR_COLUMNS} FROM sensors ORDER BY id"))
            .fetch_all(self.pool)
            .await?;
        Ok(sensors)
    }

    pub async fn set_relay_state(&self, id: i64, state: RelayState) -> Result<Sensor, DbError> {
        sqlx::query_as::<_, Sensor>(&format!(
            "UPDATE sensors SET relay_on = ? WHERE id = ? RETURNING {SENSOR_COLUMNS}"
        ))
        .bind(state.is_on())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("sensor", id))
    }

    /// Delete a sensor together with its measurements.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM sensors WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("sensor", id));
        }

        tracing::info!(sensor_id = id, "sensor deleted");
        Ok(())
    }
}
