//! Room payloads.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use hotel_booking_core::validation::messages;
use hotel_booking_core::{Fields, HotelId};

use crate::db::Store;
use crate::error::Result;
use crate::models::NewRoom;

const ROOM_NUMBER_MAX_LENGTH: usize = 10;
const ROOM_TYPE_MAX_LENGTH: usize = 50;
const PRICE_MAX_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Validate a full room payload (`POST` and `PUT`).
///
/// The price is stored with exactly two decimal places.
///
/// # Errors
///
/// Returns `AppError::Validation` with every failing field, or
/// `AppError::Database` if the hotel lookup fails.
pub async fn room(data: &Map<String, Value>, store: &dyn Store) -> Result<NewRoom> {
    let mut fields = Fields::new(data);

    let mut hotel = fields.primary_key("hotel").map(HotelId::new);
    if let Some(id) = hotel {
        if store.get_hotel(id).await?.is_none() {
            fields.add_error("hotel", messages::does_not_exist(id));
            hotel = None;
        }
    }
    let room_number = fields.string("room_number", ROOM_NUMBER_MAX_LENGTH);
    let room_type = fields.string("room_type", ROOM_TYPE_MAX_LENGTH);
    let price = fields.decimal("price_per_night", PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES);
    let price_per_night = match price {
        Some(price) if price.is_sign_negative() && !price.is_zero() => {
            fields.add_error("price_per_night", messages::NEGATIVE);
            None
        }
        other => other,
    };

    let (Some(hotel), Some(room_number), Some(room_type), Some(price_per_night)) =
        (hotel, room_number, room_type, price_per_night)
    else {
        return Err(fields.into_errors().into());
    };
    fields.finish()?;

    Ok(NewRoom {
        hotel,
        room_number,
        room_type,
        price_per_night: with_two_places(price_per_night),
    })
}

fn with_two_places(price: Decimal) -> Decimal {
    let mut price = price;
    price.rescale(PRICE_DECIMAL_PLACES);
    price
}
