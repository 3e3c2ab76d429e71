//! Hotel payloads.

use serde_json::{Map, Value};

use hotel_booking_core::{FieldErrors, Fields};

use crate::models::NewHotel;

const NAME_MAX_LENGTH: usize = 100;
const ADDRESS_MAX_LENGTH: usize = 255;

/// Validate a full hotel payload (`POST` and `PUT`).
///
/// # Errors
///
/// Returns the field errors if `name` or `address` is missing or blank.
pub fn hotel(data: &Map<String, Value>) -> Result<NewHotel, FieldErrors> {
    let mut fields = Fields::new(data);
    let name = fields.string("name", NAME_MAX_LENGTH);
    let address = fields.string("address", ADDRESS_MAX_LENGTH);

    let (Some(name), Some(address)) = (name, address) else {
        return Err(fields.into_errors());
    };
    fields.finish()?;

    Ok(NewHotel { name, address })
}
