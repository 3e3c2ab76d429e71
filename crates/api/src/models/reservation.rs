//! Reservation domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use hotel_booking_core::{ReservationId, ReservationStatus, RoomId, UserId};

/// A booking of a room by a client for a date range.
///
/// `check_out` is always after `check_in`. Overlapping reservations for the
/// same room are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    #[sqlx(rename = "room_id")]
    pub room: RoomId,
    #[sqlx(rename = "client_id")]
    pub client: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for creating or updating a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room: RoomId,
    pub client: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}

impl NewReservation {
    /// The editable fields of an existing reservation.
    #[must_use]
    pub const fn from_existing(reservation: &Reservation) -> Self {
        Self {
            room: reservation.room,
            client: reservation.client,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            status: reservation.status,
        }
    }
}
