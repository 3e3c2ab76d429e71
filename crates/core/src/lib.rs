//! Hotel Booking Core - Shared types library.
//!
//! This crate provides the domain vocabulary used by the API server and the
//! command-line tools:
//! - `api` - The REST server for hotels, rooms, reservations and users
//! - `cli` - Migrations and admin user creation
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no
//! database access, no HTTP. Database encodings for the ID newtypes are
//! available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, person names and statuses
//! - [`validation`] - Field error maps and the JSON payload field reader

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldErrors, Fields};
