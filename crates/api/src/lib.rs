//! Hotel Booking API library.
//!
//! The REST server for hotels, rooms, reservations and user accounts, as a
//! library so the binary, the CLI and the black-box tests share one router.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`db`] - Repository traits with `PostgreSQL` and in-memory stores
//! - [`input`] - Payload validation into `New*` drafts
//! - [`services`] - Registration, login and account deletion
//! - [`middleware`] - Auth extractor, sessions, request ids
//! - [`routes`] - HTTP handlers
//! - [`app`] - Router assembly

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_router;
pub use config::{ApiConfig, StorageBackend};
pub use state::AppState;
