//! Room route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use hotel_booking_core::validation::messages;
use hotel_booking_core::{FieldErrors, HotelId, RoomId};

use super::parse_id;
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::input::{self, Payload};
use crate::middleware::RequireAuth;
use crate::models::Room;
use crate::state::AppState;

/// List all rooms.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Room>>> {
    Ok(Json(state.store().list_rooms().await?))
}

/// Create a room in an existing hotel.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Payload(data): Payload,
) -> Result<(StatusCode, Json<Room>)> {
    let new = input::room(&data, state.store()).await?;
    let room = state
        .store()
        .create_room(&new)
        .await
        .map_err(|e| missing_reference(e, new.hotel))?;
    tracing::info!(room_id = %room.id, hotel_id = %room.hotel, user_id = %user.id, "Room created");
    Ok((StatusCode::CREATED, Json(room)))
}

/// Show a single room.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Room>> {
    let id: RoomId = parse_id(&id)?;
    let room = state
        .store()
        .get_room(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(room))
}

/// Replace a room's fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Payload(data): Payload,
) -> Result<Json<Room>> {
    let id: RoomId = parse_id(&id)?;
    if state.store().get_room(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let new = input::room(&data, state.store()).await?;
    let room = state
        .store()
        .update_room(id, &new)
        .await
        .map_err(|e| missing_reference(e, new.hotel))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(room))
}

/// Delete a room together with its reservations.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: RoomId = parse_id(&id)?;
    if !state.store().delete_room(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(room_id = %id, user_id = %user.id, "Room deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// The hotel can disappear between validation and the write.
fn missing_reference(err: RepositoryError, hotel: HotelId) -> AppError {
    match err {
        RepositoryError::MissingReference(_) => {
            FieldErrors::single("hotel", messages::does_not_exist(hotel)).into()
        }
        other => other.into(),
    }
}
