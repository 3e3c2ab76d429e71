//! Account route handlers: registration, self-deletion and sessions.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower_sessions::Session;

use hotel_booking_core::Fields;

use crate::error::Result;
use crate::input::{Payload, Registration};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Register a new user.
///
/// Responds `201 {"message": "User registered successfully"}`; the password
/// is never echoed.
pub async fn register(
    State(state): State<AppState>,
    Payload(data): Payload,
) -> Result<(StatusCode, Json<Value>)> {
    let registration = Registration::validate(&data, state.store()).await?;
    AuthService::new(state.store())
        .register(registration)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully"})),
    ))
}

/// Delete the caller's own account and end its session.
pub async fn delete_self(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<StatusCode> {
    AuthService::new(state.store())
        .delete_account(user.id)
        .await?;
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Start a session with email and password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Payload(data): Payload,
) -> Result<Json<CurrentUser>> {
    let mut fields = Fields::new(&data);
    let email = fields.string("email", usize::MAX);
    let password = fields.untrimmed_string("password");
    let (Some(email), Some(password)) = (email, password) else {
        return Err(fields.into_errors().into());
    };

    let user = AuthService::new(state.store())
        .login_with_password(&email, &SecretString::from(password))
        .await?;
    set_current_user(&session, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(CurrentUser::from(&user)))
}

/// End the current session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
