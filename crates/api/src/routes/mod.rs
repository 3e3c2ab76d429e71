//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (storage reachable)
//!
//! # Hotels
//! GET    /hotels/              - List hotels (public)
//! POST   /hotels/              - Create hotel (auth)
//! GET    /hotels/{id}/         - Hotel detail (auth)
//! PUT    /hotels/{id}/         - Replace hotel (auth)
//! DELETE /hotels/{id}/         - Delete hotel and its rooms (auth)
//!
//! # Rooms
//! GET    /rooms/               - List rooms (public)
//! POST   /rooms/               - Create room (auth)
//! GET    /rooms/{id}/          - Room detail (auth)
//! PUT    /rooms/{id}/          - Replace room (auth)
//! DELETE /rooms/{id}/          - Delete room and its reservations (auth)
//!
//! # Reservations
//! GET    /reservations/        - List reservations (public)
//! POST   /reservations/        - Book a room for the caller (auth)
//! GET    /reservations/{id}/   - Reservation detail (auth)
//! PATCH  /reservations/{id}/   - Partial update (auth)
//! DELETE /reservations/{id}/   - Delete reservation (auth)
//!
//! # Accounts
//! POST   /register/            - Register a user
//! DELETE /delete-user/         - Delete the caller's account (auth)
//! POST   /login/               - Start a session
//! POST   /logout/              - End the session
//! ```

pub mod hotels;
pub mod reservations;
pub mod rooms;
pub mod users;

use std::str::FromStr;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the resource and account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels/", get(hotels::list).post(hotels::create))
        .route(
            "/hotels/{id}/",
            get(hotels::show).put(hotels::update).delete(hotels::destroy),
        )
        .route("/rooms/", get(rooms::list).post(rooms::create))
        .route(
            "/rooms/{id}/",
            get(rooms::show).put(rooms::update).delete(rooms::destroy),
        )
        .route(
            "/reservations/",
            get(reservations::list).post(reservations::create),
        )
        .route(
            "/reservations/{id}/",
            get(reservations::show)
                .patch(reservations::update)
                .delete(reservations::destroy),
        )
        .route("/register/", post(users::register))
        .route("/delete-user/", delete(users::delete_self))
        .route("/login/", post(users::login))
        .route("/logout/", post(users::logout))
}

/// Parse a path id. Anything that is not a positive integer is a missing record.
fn parse_id<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse().map_err(|_| AppError::NotFound)
}
