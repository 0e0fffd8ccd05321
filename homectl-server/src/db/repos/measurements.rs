//! Measurement repository
//!
//! A measurement is one polling snapshot of a sensor; its values reference
//! the shared measurement_types table, looked up or created by name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::DbError;
use crate::models::{Property, Reading, Unit};

/// Stored measurement with its values
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub sensor_id: i64,
    pub timestamp: DateTime<Utc>,
    pub values: Vec<MeasurementValue>,
}

/// One typed value of a measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementValue {
    pub id: i64,
    pub measurement_type_id: i64,
    pub name: String,
    pub unit: String,
    pub value: f64,
}

/// Point of a sensor's history for one property
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub measurement_id: i64,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Measurement repository
pub struct MeasurementRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MeasurementRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store one snapshot for `sensor_id`, timestamped now.
    ///
    /// Runs in a single transaction: either the measurement and all of its
    /// values are written or nothing is. Zero readings still record an
    /// (empty) measurement.
    pub async fn record(&self, sensor_id: i64, readings: &[Reading]) -> Result<Measurement, DbError> {
        let mut tx = self.pool.begin().await?;
        let timestamp = Utc::now();

        let measurement_id: i64 = sqlx::query_scalar(
            "INSERT INTO measurements (sensor_id, timestamp) VALUES (?, ?) RETURNING id",
        )
        .bind(sensor_id)
        .bind(timestamp)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from_insert(e, "sensor", sensor_id))?;

        let mut values = Vec::with_capacity(readings.len());
        for reading in readings {
            // lookup-or-create; new types get the placeholder unit
            let type_row = sqlx::query(
                r#"
                INSERT INTO measurement_types (name, unit) VALUES (?, ?)
                ON CONFLICT (name) DO UPDATE SET name = excluded.name
                RETURNING id, unit
                "#,
            )
            .bind(&reading.name)
            .bind(Unit::PLACEHOLDER)
            .fetch_one(&mut *tx)
            .await?;
            let type_id: i64 = type_row.get("id");

            let value_id: i64 = sqlx::query_scalar(
                "INSERT INTO measurement_values (value, measurement_id, measurement_type_id) VALUES (?, ?, ?) RETURNING id",
            )
            .bind(reading.value)
            .bind(measurement_id)
            .bind(type_id)
            .fetch_one(&mut *tx)
            .await?;

            values.push(MeasurementValue {
                id: value_id,
                measurement_type_id: type_id,
                name: reading.name.clone(),
                unit: type_row.get("unit"),
                value: reading.value,
            });
        }

        tx.commit().await?;

        Ok(Measurement {
            id: measurement_id,
            sensor_id,
            timestamp,
            values,
        })
    }

    /// Most recent measurement of a sensor, if any.
    pub async fn latest(&self, sensor_id: i64) -> Result<Option<Measurement>, DbError> {
        let row = sqlx::query(
            "SELECT id, timestamp FROM measurements WHERE sensor_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(sensor_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let measurement_id: i64 = row.get("id");

        let values = sqlx::query(
            r#"
            SELECT v.id, v.value, t.id AS type_id, t.name, t.unit
            FROM measurement_values v
            JOIN measurement_types t ON t.id = v.measurement_type_id
            WHERE v.measurement_id = ?
            ORDER BY v.id
            "#,
        )
        .bind(measurement_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|r| MeasurementValue {
            id: r.get("id"),
            measurement_type_id: r.get("type_id"),
            name: r.get("name"),
            unit: r.get("unit"),
            value: r.get("value"),
        })
        .collect();

        Ok(Some(Measurement {
            id: measurement_id,
            sensor_id,
            timestamp: row.get("timestamp"),
            values,
        }))
    }

    /// History of one property for a sensor, oldest first.
    ///
    /// Each measurement contributes its first value of that property;
    /// measurements without one are skipped. `limit` keeps the most recent
    /// points.
    pub async fn history(
        &self,
        sensor_id: i64,
        property: &Property,
        limit: Option<u32>,
    ) -> Result<Vec<HistoryPoint>, DbError> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(i64::from).unwrap_or(-1);

        let rows = sqlx::query(
            r#"
            SELECT m.id, m.timestamp, v.value
            FROM measurements m
            JOIN measurement_values v ON v.id = (
                SELECT MIN(v2.id)
                FROM measurement_values v2
                JOIN measurement_types t ON t.id = v2.measurement_type_id
                WHERE v2.measurement_id = m.id AND t.name = ?
            )
            WHERE m.sensor_id = ?
            ORDER BY m.id DESC
            LIMIT ?
            "#,
        )
        .bind(property.as_str())
        .bind(sensor_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        let mut points: Vec<HistoryPoint> = rows
            .into_iter()
            .map(|r| HistoryPoint {
                measurement_id: r.get("id"),
                timestamp: r.get("timestamp"),
                value: r.get("value"),
            })
            .collect();
        points.reverse();

        Ok(points)
    }

    /// Names of every property recorded for a sensor.
    pub async fn properties(&self, sensor_id: i64) -> Result<Vec<String>, DbError> {
        let names = sqlx::query_scalar(
            r#"
            SELECT DISTINCT t.name
            FROM measurement_types t
            JOIN measurement_values v ON v.measurement_type_id = t.id
            JOIN measurements m ON m.id = v.measurement_id
            WHERE m.sensor_id = ?
            ORDER BY t.name
            "#,
        )
        .bind(sensor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }
}
