//! Home repository
//!
//! - list_tree: homes with their rooms and sensors in one LEFT JOIN query

use serde::Serialize;
use sqlx::{FromRow, Row, SqlitePool};

use super::{DbError, Sensor};
use crate::models::EntityName;

/// Home record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Home {
    pub id: i64,
    pub name: String,
}

/// Home with nested rooms, as shown on the overview
#[derive(Debug, Clone, Serialize)]
pub struct HomeTree {
    pub id: i64,
    pub name: String,
    pub rooms: Vec<RoomTree>,
}

/// Room with its sensors
#[derive(Debug, Clone, Serialize)]
pub struct RoomTree {
    pub id: i64,
    pub name: String,
    pub sensors: Vec<Sensor>,
}

/// Home repository
pub struct HomeRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HomeRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: EntityName) -> Result<Home, DbError> {
        let home = sqlx::query_as::<_, Home>("INSERT INTO homes (name) VALUES (?) RETURNING id, name")
            .bind(name.as_str())
            .fetch_one(self.pool)
            .await?;

        tracing::info!(home_id = home.id, name = %home.name, "home created");
        Ok(home)
    }

    pub async fn get(&self, id: i64) -> Result<Home, DbError> {
        sqlx::query_as::<_, Home>("SELECT id, name FROM homes WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("home", id))
    }

    /// All homes with rooms and sensors.
    ///
    /// Single query; rows arrive ordered by home, room, sensor and are folded
    /// into the tree. Homes without rooms and rooms without sensors are kept.
    pub async fn list_tree(&self) -> Result<Vec<HomeTree>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                h.id AS home_id,
                h.name AS home_name,
                r.id AS room_id,
                r.name AS room_name,
                s.id AS sensor_id,
                s.name AS sensor_name,
                s.url AS sensor_url,
                s.relay_url AS relay_url,
                s.relay_on AS relay_on
            FROM homes h
            LEFT JOIN rooms r ON r.home_id = h.id
            LEFT JOIN sensors s ON s.room_id = r.id
            ORDER BY h.id, r.id, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut homes: Vec<HomeTree> = Vec::new();

        for row in rows {
            let home_id: i64 = row.get("home_id");
            if homes.last().map(|h| h.id) != Some(home_id) {
                homes.push(HomeTree {
                    id: home_id,
                    name: row.get("home_name"),
                    rooms: Vec::new(),
                });
            }
            let Some(home) = homes.last_mut() else {
                continue;
            };

            let Some(room_id) = row.get::<Option<i64>, _>("room_id") else {
                continue;
            };
            if home.rooms.last().map(|r| r.id) != Some(room_id) {
                home.rooms.push(RoomTree {
                    id: room_id,
                    name: row.get("room_name"),
                    sensors: Vec::new(),
                });
            }
            let Some(room) = home.rooms.last_mut() else {
                continue;
            };

            if let Some(sensor_id) = row.get::<Option<i64>, _>("sensor_id") {
                room.sensors.push(Sensor {
                    id: sensor_id,
                    name: row.get("sensor_name"),
                    url: row.get("sensor_url"),
                    relay_url: row.get("relay_url"),
                    relay_on: row.get("relay_on"),
                    room_id,
                });
            }
        }

        Ok(homes)
    }

    /// Delete a home; rooms, sensors and measurements go with it.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM homes WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("home", id));
        }

        tracing::info!(home_id = id, "home deleted");
        Ok(())
    }
}
