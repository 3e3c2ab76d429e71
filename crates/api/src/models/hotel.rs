//! Hotel domain types.

use serde::Serialize;

use hotel_booking_core::HotelId;

/// A hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub address: String,
}

/// Validated fields for creating or replacing a hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
}

impl Hotel {
    /// Build the persisted hotel from its id and validated fields.
    #[must_use]
    pub fn from_new(id: HotelId, new: &NewHotel) -> Self {
        Self {
            id,
            name: new.name.clone(),
            address: new.address.clone(),
        }
    }
}
