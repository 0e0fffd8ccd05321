//! Measurement type repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::Unit;

/// Named, unit-tagged category of value shared across sensors
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MeasurementType {
    pub id: i64,
    pub name: String,
    pub unit: String,
}

/// Measurement type repository
pub struct MeasurementTypeRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MeasurementTypeRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<MeasurementType>, DbError> {
        let types = sqlx::query_as::<_, MeasurementType>(
            "SELECT id, name, unit FROM measurement_types ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(types)
    }

    /// Replace the unit of a type (e.g. the `unit` placeholder with `°C`).
    pub async fn set_unit(&self, id: i64, unit: Unit) -> Result<MeasurementType, DbError> {
        let updated = sqlx::query_as::<_, MeasurementType>(
            "UPDATE measurement_types SET unit = ? WHERE id = ? RETURNING id, name, unit",
        )
        .bind(unit.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("measurement type", id))?;

        tracing::info!(type_id = id, name = %updated.name, unit = %updated.unit, "measurement unit changed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{fixtures, MeasurementRepo};
    use crate::models::Reading;

    #[tokio::test]
    async fn set_unit_replaces_placeholder() {
        let pool = fixtures::pool().await;
        let sensor = fixtures::sensor(&pool, "http://a.local/", None).await;
        MeasurementRepo::new(&pool)
            .record(sensor.id, &[Reading::new("temperature", 20.0)])
            .await
            .unwrap();

        let repo = MeasurementTypeRepo::new(&pool);
        let types = repo.list().await.unwrap();
        assert_eq!(types[0].unit, "unit");

        let updated = repo.set_unit(types[0].id, Unit::new("°C").unwrap()).await.unwrap();
        assert_eq!(updated.unit, "°C");

        // later polls keep the chosen unit
        let m = MeasurementRepo::new(&pool)
            .record(sensor.id, &[Reading::new("temperature", 21.0)])
            .await
            .unwrap();
        assert_eq!(m.values[0].unit, "°C");
    }

    #[tokio::test]
    async fn set_unit_unknown_type() {
        let pool = fixtures::pool().await;
        let err = MeasurementTypeRepo::new(&pool)
            .set_unit(3, Unit::new("%").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
