//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Maps foreign key violations to NotFound for the missing parent
//! - Uses transactions for multi-step operations

pub mod homes;
pub mod rooms;
pub mod sensors;
pub mod measurements;
pub mod measurement_types;
pub mod settings;

pub use homes::{Home, HomeRepo, HomeTree, RoomTree};
pub use rooms::{Room, RoomRepo};
pub use sensors::{Sensor, SensorRepo};
pub use measurements::{HistoryPoint, Measurement, MeasurementRepo, MeasurementValue};
pub use measurement_types::{MeasurementType, MeasurementTypeRepo};
pub use settings::SettingsRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Turn a foreign key violation on insert into NotFound for the parent row.
    pub(crate) fn from_insert(err: sqlx::Error, parent: &'static str, parent_id: i64) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_foreign_key_violation() {
                return Self::not_found(parent, parent_id);
            }
        }
        Self::Sqlx(err)
    }
}
