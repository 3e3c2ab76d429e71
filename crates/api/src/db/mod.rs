//! Persistence for hotels, rooms, reservations and users.
//!
//! Handlers never touch a connection directly: they receive a [`Store`]
//! through [`crate::state::AppState`]. Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx, used in production
//! - [`MemoryStore`] - process-local maps, used for development and tests
//!
//! # Tables
//!
//! - `app_user` - Accounts (unique email, Argon2 password hash)
//! - `hotel`
//! - `room` - `hotel_id` cascades on hotel delete
//! - `reservation` - `room_id` / `client_id` cascade on room / user delete
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p hotel-booking-cli -- migrate
//! ```

pub mod hotels;
pub mod memory;
pub mod reservations;
pub mod rooms;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use hotels::HotelRepository;
pub use memory::MemoryStore;
pub use reservations::ReservationRepository;
pub use rooms::RoomRepository;
pub use users::UserRepository;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),
}

/// The persistence context injected into every handler.
#[async_trait]
pub trait Store:
    HotelRepository + RoomRepository + ReservationRepository + UserRepository + Send + Sync
{
    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Translate constraint violations on insert/update into repository errors.
///
/// `reference` names the field a foreign key violation is reported against;
/// it is called with the violated constraint's name.
fn map_write_error(err: sqlx::Error, reference: impl Fn(&str) -> &'static str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(
                db_err.constraint().unwrap_or("unique").to_owned(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::MissingReference(reference(
                db_err.constraint().unwrap_or_default(),
            ));
        }
    }
    RepositoryError::Database(err)
}
