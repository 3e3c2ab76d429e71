//! Reservation repository.

use async_trait::async_trait;

use hotel_booking_core::ReservationId;

use super::{PgStore, RepositoryError, map_write_error};
use crate::models::{NewReservation, Reservation};

const RESERVATION_COLUMNS: &str =
    "id, room_id, client_id, check_in, check_out, status, created_at";

/// Reservation persistence operations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// All reservations, ordered by id.
    async fn list_reservations(&self) -> Result<Vec<Reservation>, RepositoryError>;

    async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, RepositoryError>;

    /// Create a reservation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` naming `room` or `client`
    /// if either does not exist.
    async fn create_reservation(
        &self,
        new: &NewReservation,
    ) -> Result<Reservation, RepositoryError>;

    /// Overwrite the editable fields. Returns `None` if it does not exist.
    async fn update_reservation(
        &self,
        id: ReservationId,
        new: &NewReservation,
    ) -> Result<Option<Reservation>, RepositoryError>;

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool, RepositoryError>;
}

/// Which field a reservation foreign key violation belongs to.
fn reservation_reference(constraint: &str) -> &'static str {
    if constraint.contains("client") {
        "client"
    } else {
        "room"
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, RepositoryError> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservation ORDER BY id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(reservations)
    }

    async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, RepositoryError> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservation WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(reservation)
    }

    async fn create_reservation(
        &self,
        new: &NewReservation,
    ) -> Result<Reservation, RepositoryError> {
        sqlx::query_as::<_, Reservation>(&format!(
            r"
            INSERT INTO reservation (room_id, client_id, check_in, check_out, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RESERVATION_COLUMNS}
            "
        ))
        .bind(new.room)
        .bind(new.client)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.status)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_write_error(e, reservation_reference))
    }

    async fn update_reservation(
        &self,
        id: ReservationId,
        new: &NewReservation,
    ) -> Result<Option<Reservation>, RepositoryError> {
        sqlx::query_as::<_, Reservation>(&format!(
            r"
            UPDATE reservation
            SET room_id = $2, check_in = $3, check_out = $4, status = $5
            WHERE id = $1
            RETURNING {RESERVATION_COLUMNS}
            "
        ))
        .bind(id)
        .bind(new.room)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.status)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_write_error(e, reservation_reference))
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM reservation WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
