//! Domain models.
//!
//! Each entity has a persisted representation (serialized as the API
//! response) and a `New*` draft produced by input validation.

pub mod hotel;
pub mod reservation;
pub mod room;
pub mod user;

pub use hotel::{Hotel, NewHotel};
pub use reservation::{NewReservation, Reservation};
pub use room::{NewRoom, Room};
pub use user::{CurrentUser, NewUser, User, session_keys};
