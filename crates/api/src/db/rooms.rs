//! Room repository.

use async_trait::async_trait;

use hotel_booking_core::RoomId;

use super::{PgStore, RepositoryError, map_write_error};
use crate::models::{NewRoom, Room};

const ROOM_COLUMNS: &str = "id, hotel_id, room_number, room_type, price_per_night";

/// Room persistence operations.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms, ordered by id.
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    async fn get_room(&self, id: RoomId) -> Result<Option<Room>, RepositoryError>;

    /// Create a room.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference("hotel")` if the hotel does not exist.
    async fn create_room(&self, new: &NewRoom) -> Result<Room, RepositoryError>;

    /// Replace every field of a room. Returns `None` if it does not exist.
    async fn update_room(&self, id: RoomId, new: &NewRoom)
    -> Result<Option<Room>, RepositoryError>;

    /// Delete a room and, by cascade, its reservations.
    async fn delete_room(&self, id: RoomId) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl RoomRepository for PgStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let rooms = sqlx::query_as::<_, Room>(&format!("SELECT {ROOM_COLUMNS} FROM room ORDER BY id"))
            .fetch_all(self.pool())
            .await?;
        Ok(rooms)
    }

    async fn get_room(&self, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        let room = sqlx::query_as::<_, Room>(&format!("SELECT {ROOM_COLUMNS} FROM room WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(room)
    }

    async fn create_room(&self, new: &NewRoom) -> Result<Room, RepositoryError> {
        sqlx::query_as::<_, Room>(&format!(
            r"
            INSERT INTO room (hotel_id, room_number, room_type, price_per_night)
            VALUES ($1, $2, $3, $4)
            RETURNING {ROOM_COLUMNS}
            "
        ))
        .bind(new.hotel)
        .bind(&new.room_number)
        .bind(&new.room_type)
        .bind(new.price_per_night)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_write_error(e, |_| "hotel"))
    }

    async fn update_room(
        &self,
        id: RoomId,
        new: &NewRoom,
    ) -> Result<Option<Room>, RepositoryError> {
        sqlx::query_as::<_, Room>(&format!(
            r"
            UPDATE room
            SET hotel_id = $2, room_number = $3, room_type = $4, price_per_night = $5
            WHERE id = $1
            RETURNING {ROOM_COLUMNS}
            "
        ))
        .bind(id)
        .bind(new.hotel)
        .bind(&new.room_number)
        .bind(&new.room_type)
        .bind(new.price_per_night)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_write_error(e, |_| "hotel"))
    }

    async fn delete_room(&self, id: RoomId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM room WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
