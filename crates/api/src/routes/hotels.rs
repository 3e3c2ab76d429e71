//! Hotel route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use hotel_booking_core::HotelId;

use super::parse_id;
use crate::error::{AppError, Result};
use crate::input::{self, Payload};
use crate::middleware::RequireAuth;
use crate::models::Hotel;
use crate::state::AppState;

/// List all hotels.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>> {
    Ok(Json(state.store().list_hotels().await?))
}

/// Create a hotel.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Payload(data): Payload,
) -> Result<(StatusCode, Json<Hotel>)> {
    let new = input::hotel(&data)?;
    let hotel = state.store().create_hotel(&new).await?;
    tracing::info!(hotel_id = %hotel.id, user_id = %user.id, "Hotel created");
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// Show a single hotel.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Hotel>> {
    let id: HotelId = parse_id(&id)?;
    let hotel = state
        .store()
        .get_hotel(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(hotel))
}

/// Replace a hotel's fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Payload(data): Payload,
) -> Result<Json<Hotel>> {
    let id: HotelId = parse_id(&id)?;
    if state.store().get_hotel(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let new = input::hotel(&data)?;
    let hotel = state
        .store()
        .update_hotel(id, &new)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(hotel))
}

/// Delete a hotel together with its rooms and their reservations.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: HotelId = parse_id(&id)?;
    if !state.store().delete_hotel(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(hotel_id = %id, user_id = %user.id, "Hotel deleted");
    Ok(StatusCode::NO_CONTENT)
}
