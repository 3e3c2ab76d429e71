//! Authentication extractor and session helpers.
//!
//! A request is authenticated either by a session cookie set by `POST /login/`
//! or by an `Authorization: Basic` header. A session whose user no longer
//! exists counts as anonymous.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::SecretString;
use tower_sessions::Session;

use hotel_booking_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::models::{CurrentUser, User, session_keys};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Rejects with `403 {"error": "Authentication credentials were not provided."}`
/// when neither a session nor Basic credentials identify a user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match basic_credentials(parts)? {
            Some((email, password)) => Some(basic_login(state, &email, &password).await?),
            None => session_user(parts, state).await?,
        };

        let user = user.ok_or_else(AppError::not_authenticated)?;
        set_sentry_user(&user.id, Some(&user.email));
        Ok(Self(user))
    }
}

/// Decode `Authorization: Basic base64(email:password)`, if present.
fn basic_credentials(parts: &Parts) -> Result<Option<(String, SecretString)>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let Some(encoded) = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Basic "))
    else {
        return Ok(None);
    };

    let invalid = || AppError::Forbidden("Invalid basic header.".to_owned());
    let decoded = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
    let (email, password) = decoded.split_once(':').ok_or_else(invalid)?;

    Ok(Some((email.to_owned(), SecretString::from(password.to_owned()))))
}

async fn basic_login(
    state: &AppState,
    email: &str,
    password: &SecretString,
) -> Result<CurrentUser, AppError> {
    match AuthService::new(state.store())
        .login_with_password(email, password)
        .await
    {
        Ok(user) => Ok(CurrentUser::from(&user)),
        Err(AuthError::InvalidCredentials) => {
            Err(AppError::Forbidden("Invalid username/password.".to_owned()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn session_user(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, AppError> {
    let Some(session) = parts.extensions.get::<Session>() else {
        return Ok(None);
    };
    let Some(user_id) = session.get::<UserId>(session_keys::USER_ID).await? else {
        return Ok(None);
    };

    let user = state.store().get_user(user_id).await?;
    if user.is_none() {
        tracing::debug!(user_id = %user_id, "Session refers to a deleted user");
    }
    Ok(user.as_ref().map(CurrentUser::from))
}

/// Log a user in: rotate the session id and remember the user.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::USER_ID, user.id).await
}

/// Log the current user out and drop all session data.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
