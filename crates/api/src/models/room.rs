//! Room domain types.

use rust_decimal::Decimal;
use serde::Serialize;

use hotel_booking_core::{HotelId, RoomId};

/// A bookable room belonging to one hotel.
///
/// `price_per_night` serializes as a string with two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Room {
    pub id: RoomId,
    #[sqlx(rename = "hotel_id")]
    pub hotel: HotelId,
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: Decimal,
}

/// Validated fields for creating or replacing a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub hotel: HotelId,
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: Decimal,
}

impl Room {
    /// Build the persisted room from its id and validated fields.
    #[must_use]
    pub fn from_new(id: RoomId, new: &NewRoom) -> Self {
        Self {
            id,
            hotel: new.hotel,
            room_number: new.room_number.clone(),
            room_type: new.room_type.clone(),
            price_per_night: new.price_per_night,
        }
    }
}
