//! Hotel repository.

use async_trait::async_trait;

use hotel_booking_core::HotelId;

use super::{PgStore, RepositoryError, map_write_error};
use crate::models::{Hotel, NewHotel};

/// Hotel persistence operations.
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// All hotels, ordered by id.
    async fn list_hotels(&self) -> Result<Vec<Hotel>, RepositoryError>;

    async fn get_hotel(&self, id: HotelId) -> Result<Option<Hotel>, RepositoryError>;

    async fn create_hotel(&self, new: &NewHotel) -> Result<Hotel, RepositoryError>;

    /// Replace every field of a hotel. Returns `None` if it does not exist.
    async fn update_hotel(
        &self,
        id: HotelId,
        new: &NewHotel,
    ) -> Result<Option<Hotel>, RepositoryError>;

    /// Delete a hotel and, by cascade, its rooms and their reservations.
    ///
    /// Returns `true` if the hotel was deleted, `false` if it didn't exist.
    async fn delete_hotel(&self, id: HotelId) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl HotelRepository for PgStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, RepositoryError> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT id, name, address FROM hotel ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(hotels)
    }

    async fn get_hotel(&self, id: HotelId) -> Result<Option<Hotel>, RepositoryError> {
        let hotel =
            sqlx::query_as::<_, Hotel>("SELECT id, name, address FROM hotel WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(hotel)
    }

    async fn create_hotel(&self, new: &NewHotel) -> Result<Hotel, RepositoryError> {
        sqlx::query_as::<_, Hotel>(
            r"
            INSERT INTO hotel (name, address)
            VALUES ($1, $2)
            RETURNING id, name, address
            ",
        )
        .bind(&new.name)
        .bind(&new.address)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_write_error(e, |_| "hotel"))
    }

    async fn update_hotel(
        &self,
        id: HotelId,
        new: &NewHotel,
    ) -> Result<Option<Hotel>, RepositoryError> {
        sqlx::query_as::<_, Hotel>(
            r"
            UPDATE hotel
            SET name = $2, address = $3
            WHERE id = $1
            RETURNING id, name, address
            ",
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.address)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_write_error(e, |_| "hotel"))
    }

    async fn delete_hotel(&self, id: HotelId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
