//! Reservation route handlers.
//!
//! The client of a new reservation is always the caller.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use hotel_booking_core::validation::messages;
use hotel_booking_core::{FieldErrors, ReservationId};

use super::parse_id;
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::input::{self, Payload};
use crate::middleware::RequireAuth;
use crate::models::{NewReservation, Reservation};
use crate::state::AppState;

/// List all reservations.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Reservation>>> {
    Ok(Json(state.store().list_reservations().await?))
}

/// Book a room for the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Payload(data): Payload,
) -> Result<(StatusCode, Json<Reservation>)> {
    let new = input::new_reservation(&data, user.id, state.store()).await?;
    let reservation = state
        .store()
        .create_reservation(&new)
        .await
        .map_err(|e| write_error(e, &new))?;
    tracing::info!(
        reservation_id = %reservation.id,
        room_id = %reservation.room,
        user_id = %user.id,
        "Reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Show a single reservation.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Reservation>> {
    let id: ReservationId = parse_id(&id)?;
    let reservation = state
        .store()
        .get_reservation(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reservation))
}

/// Update some fields of a reservation.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Payload(data): Payload,
) -> Result<Json<Reservation>> {
    let id: ReservationId = parse_id(&id)?;
    let existing = state
        .store()
        .get_reservation(id)
        .await?
        .ok_or(AppError::NotFound)?;

    let new = input::patch_reservation(&data, &existing, state.store()).await?;
    let reservation = state
        .store()
        .update_reservation(id, &new)
        .await
        .map_err(|e| write_error(e, &new))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reservation))
}

/// Delete a reservation.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: ReservationId = parse_id(&id)?;
    if !state.store().delete_reservation(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(reservation_id = %id, user_id = %user.id, "Reservation deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// The room or the client can disappear between validation and the write.
fn write_error(err: RepositoryError, new: &NewReservation) -> AppError {
    match err {
        RepositoryError::MissingReference("client") => AppError::not_authenticated(),
        RepositoryError::MissingReference(_) => {
            FieldErrors::single("room", messages::does_not_exist(new.room)).into()
        }
        other => other.into(),
    }
}
