//! Reservation payloads.
//!
//! The client is never read from the payload: it is the authenticated
//! requester on create and stays unchanged on update.

use serde_json::{Map, Value};

use hotel_booking_core::validation::messages;
use hotel_booking_core::{Fields, ReservationStatus, RoomId, UserId};

use crate::db::Store;
use crate::error::Result;
use crate::models::{NewReservation, Reservation};

/// Key for errors that concern more than one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";
/// Reported when the stay is empty or reversed.
pub const CHECK_OUT_BEFORE_CHECK_IN: &str = "Check-out date must be after check-in date.";

/// Validate a reservation payload for `POST`.
///
/// `status` is optional and defaults to `pending`.
///
/// # Errors
///
/// Returns `AppError::Validation` with every failing field, or
/// `AppError::Database` if the room lookup fails.
pub async fn new_reservation(
    data: &Map<String, Value>,
    client: UserId,
    store: &dyn Store,
) -> Result<NewReservation> {
    let mut fields = Fields::new(data);

    let room = read_room(&mut fields, store).await?;
    let check_in = fields.date("check_in");
    let check_out = fields.date("check_out");
    let status = if fields.is_present("status") {
        fields.choice::<ReservationStatus>("status")
    } else {
        Some(ReservationStatus::default())
    };

    let (Some(room), Some(check_in), Some(check_out), Some(status)) =
        (room, check_in, check_out, status)
    else {
        return Err(fields.into_errors().into());
    };

    check_dates(
        fields,
        NewReservation {
            room,
            client,
            check_in,
            check_out,
            status,
        },
    )
}

/// Validate a partial reservation payload for `PATCH`.
///
/// Absent fields keep their current value; the date order is checked on the
/// merged result.
///
/// # Errors
///
/// Returns `AppError::Validation` with every failing field, or
/// `AppError::Database` if the room lookup fails.
pub async fn patch_reservation(
    data: &Map<String, Value>,
    existing: &Reservation,
    store: &dyn Store,
) -> Result<NewReservation> {
    let mut fields = Fields::partial(data);
    let mut draft = NewReservation::from_existing(existing);

    if let Some(room) = read_room(&mut fields, store).await? {
        draft.room = room;
    }
    if let Some(check_in) = fields.date("check_in") {
        draft.check_in = check_in;
    }
    if let Some(check_out) = fields.date("check_out") {
        draft.check_out = check_out;
    }
    if let Some(status) = fields.choice::<ReservationStatus>("status") {
        draft.status = status;
    }

    check_dates(fields, draft)
}

async fn read_room(fields: &mut Fields<'_>, store: &dyn Store) -> Result<Option<RoomId>> {
    let Some(id) = fields.primary_key("room").map(RoomId::new) else {
        return Ok(None);
    };
    if store.get_room(id).await?.is_none() {
        fields.add_error("room", messages::does_not_exist(id));
        return Ok(None);
    }
    Ok(Some(id))
}

fn check_dates(mut fields: Fields<'_>, draft: NewReservation) -> Result<NewReservation> {
    let dates_valid = !fields.has_error("check_in") && !fields.has_error("check_out");
    if dates_valid && draft.check_out <= draft.check_in {
        fields.add_error(NON_FIELD_ERRORS, CHECK_OUT_BEFORE_CHECK_IN);
    }
    fields.finish()?;
    Ok(draft)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    use hotel_booking_core::{Email, FieldErrors, PersonName, ReservationId};

    use super::*;
    use crate::db::{HotelRepository, MemoryStore, RoomRepository, UserRepository};
    use crate::error::AppError;
    use crate::input::object;
    use crate::models::{NewHotel, NewRoom, NewUser};

    struct Fixture {
        store: MemoryStore,
        room: RoomId,
        client: UserId,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let hotel = store
            .create_hotel(&NewHotel {
                name: "Hotel A".to_owned(),
                address: "Main St 1".to_owned(),
            })
            .await
            .unwrap();
        let room = store
            .create_room(&NewRoom {
                hotel: hotel.id,
                room_number: "101".to_owned(),
                room_type: "Single".to_owned(),
                price_per_night: Decimal::new(10000, 2),
            })
            .await
            .unwrap();
        let client = store
            .create_user(&NewUser {
                email: Email::parse("guest@gmail.com").unwrap(),
                first_name: PersonName::parse("John").unwrap(),
                last_name: PersonName::parse("Doe").unwrap(),
                password_hash: "hash".to_owned(),
            })
            .await
            .unwrap();
        Fixture {
            store,
            room: room.id,
            client: client.id,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn errors_of(result: Result<NewReservation>) -> FieldErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    fn existing(f: &Fixture) -> Reservation {
        Reservation {
            id: ReservationId::new(1),
            room: f.room,
            client: f.client,
            check_in: date("2026-03-01"),
            check_out: date("2026-03-05"),
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let f = fixture().await;
        let data = object(json!({
            "room": f.room.as_i32(),
            "check_in": "2026-03-01",
            "check_out": "2026-03-05",
        }));

        let draft = new_reservation(&data, f.client, &f.store).await.unwrap();
        assert_eq!(draft.status, ReservationStatus::Pending);
        assert_eq!(draft.client, f.client);
        assert_eq!(draft.check_in, date("2026-03-01"));
    }

    #[tokio::test]
    async fn test_create_ignores_client_in_payload() {
        let f = fixture().await;
        let data = object(json!({
            "room": f.room.as_i32(),
            "client": 9999,
            "check_in": "2026-03-01",
            "check_out": "2026-03-05",
        }));

        let draft = new_reservation(&data, f.client, &f.store).await.unwrap();
        assert_eq!(draft.client, f.client);
    }

    #[tokio::test]
    async fn test_create_rejects_reversed_dates() {
        let f = fixture().await;
        let data = object(json!({
            "room": f.room.as_i32(),
            "check_in": "2026-03-05",
            "check_out": "2026-03-05",
        }));

        let errors = errors_of(new_reservation(&data, f.client, &f.store).await);
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            [CHECK_OUT_BEFORE_CHECK_IN]
        );
    }

    #[tokio::test]
    async fn test_create_reports_every_field() {
        let f = fixture().await;
        let data = object(json!({
            "room": 404,
            "check_in": "tomorrow",
            "status": "booked",
        }));

        let errors = errors_of(new_reservation(&data, f.client, &f.store).await);
        assert!(errors.contains("room"));
        assert!(errors.contains("check_in"));
        assert_eq!(errors.get("check_out").unwrap(), [messages::REQUIRED]);
        assert_eq!(
            errors.get("status").unwrap(),
            ["\"booked\" is not a valid choice."]
        );
    }

    #[tokio::test]
    async fn test_patch_merges_with_existing() {
        let f = fixture().await;
        let data = object(json!({"status": "confirmed"}));

        let draft = patch_reservation(&data, &existing(&f), &f.store)
            .await
            .unwrap();
        assert_eq!(draft.status, ReservationStatus::Confirmed);
        assert_eq!(draft.check_in, date("2026-03-01"));
        assert_eq!(draft.check_out, date("2026-03-05"));
    }

    #[tokio::test]
    async fn test_patch_checks_merged_dates() {
        let f = fixture().await;
        let data = object(json!({"check_in": "2026-03-10"}));

        let errors = errors_of(patch_reservation(&data, &existing(&f), &f.store).await);
        assert!(errors.contains(NON_FIELD_ERRORS));
    }

    #[tokio::test]
    async fn test_patch_bad_date_does_not_add_order_error() {
        let f = fixture().await;
        let data = object(json!({"check_out": "soon"}));

        let errors = errors_of(patch_reservation(&data, &existing(&f), &f.store).await);
        assert_eq!(errors.get("check_out").unwrap(), [messages::INVALID_DATE]);
        assert!(!errors.contains(NON_FIELD_ERRORS));
    }
}
