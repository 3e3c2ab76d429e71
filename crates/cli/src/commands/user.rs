//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! booking-cli user create -e admin@gmail.com -f Ada -l Lovelace -p 'long-password'
//! ```
//!
//! The input goes through the same validation as `POST /register/`.

use serde_json::{Map, Value};
use thiserror::Error;

use hotel_booking_api::db::{PgStore, create_pool};
use hotel_booking_api::error::AppError;
use hotel_booking_api::input::Registration;
use hotel_booking_api::services::{AuthError, AuthService};
use hotel_booking_core::{FieldErrors, UserId};

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// One or more fields were rejected.
    #[error("Invalid user: {0}")]
    Invalid(FieldErrors),

    /// Validation could not run.
    #[error("{0}")]
    Api(AppError),

    /// Creating the user failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

impl From<AppError> for UserError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(errors) => Self::Invalid(errors),
            other => Self::Api(other),
        }
    }
}

/// Create a new user.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns an error if a field is invalid, the email is taken or the
/// database is unreachable.
pub async fn create(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: String,
) -> Result<UserId, UserError> {
    let database_url = database_url().ok_or(UserError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to database...");
    let store = PgStore::new(create_pool(&database_url).await?);

    let data = registration_payload(email, first_name, last_name, password);
    let registration = Registration::validate(&data, &store).await?;
    let user = AuthService::new(&store).register(registration).await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(user.id)
}

fn registration_payload(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: String,
) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("email".to_owned(), Value::from(email));
    data.insert("first_name".to_owned(), Value::from(first_name));
    data.insert("last_name".to_owned(), Value::from(last_name));
    data.insert("password".to_owned(), Value::from(password));
    data
}
