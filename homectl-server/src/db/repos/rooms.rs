//! Room repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::EntityName;

/// Room record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub home_id: i64,
}

/// Room repository
pub struct RoomRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RoomRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a room in `home_id`; an unknown home is NotFound.
    pub async fn create(&self, home_id: i64, name: EntityName) -> Result<Room, DbError> {
        let room = sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (name, home_id) VALUES (?, ?) RETURNING id, name, home_id",
        )
        .bind(name.as_str())
        .bind(home_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, "home", home_id))?;

        tracing::info!(room_id = room.id, home_id, name = %room.name, "room created");
        Ok(room)
    }

    pub async fn get(&self, id: i64) -> Result<Room, DbError> {
        sqlx::query_as::<_, Room>("SELECT id, name, home_id FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("room", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("room", id));
        }

        tracing::info!(room_id = id, "room deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::fixtures;
    use crate::db::repos::HomeRepo;

    #[tokio::test]
    async fn create_in_unknown_home_is_not_found() {
        let pool = fixtures::pool().await;
        let err = RoomRepo::new(&pool)
            .create(99, EntityName::new("Attic").unwrap())
            .await
            .unwrap_err();

        match err {
            DbError::NotFound { resource, id } => {
                assert_eq!(resource, "home");
                assert_eq!(id, "99");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_get_delete() {
        let pool = fixtures::pool().await;
        let home = HomeRepo::new(&pool)
            .create(EntityName::new("Home").unwrap())
            .await
            .unwrap();
        let repo = RoomRepo::new(&pool);

        let room = repo.create(home.id, EntityName::new("Attic").unwrap()).await.unwrap();
        assert_eq!(repo.get(room.id).await.unwrap().home_id, home.id);

        repo.delete(room.id).await.unwrap();
        assert!(matches!(repo.get(room.id).await, Err(DbError::NotFound { .. })));
    }
}
