//! Registration payloads.

use secrecy::SecretString;
use serde_json::{Map, Value};

use hotel_booking_core::validation::messages;
use hotel_booking_core::{Email, Fields, PersonName};

use crate::db::Store;
use crate::error::Result;

/// Minimum password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validated registration data. The password is still in clear text.
#[derive(Debug)]
pub struct Registration {
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: SecretString,
}

impl Registration {
    /// Validate a registration payload.
    ///
    /// An email that is already registered is reported as a field error in
    /// the same pass as the format checks.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` with every failing field, or
    /// `AppError::Database` if the existence check fails.
    pub async fn validate(data: &Map<String, Value>, store: &dyn Store) -> Result<Self> {
        let mut fields = Fields::new(data);

        let mut email = read_email(&mut fields);
        if let Some(address) = &email {
            if store.find_user_by_email(address).await?.is_some() {
                fields.add_error("email", messages::EMAIL_TAKEN);
                email = None;
            }
        }
        let first_name = read_name(&mut fields, "first_name");
        let last_name = read_name(&mut fields, "last_name");
        let password = read_password(&mut fields);

        let (Some(email), Some(first_name), Some(last_name), Some(password)) =
            (email, first_name, last_name, password)
        else {
            return Err(fields.into_errors().into());
        };
        fields.finish()?;

        Ok(Self {
            email,
            first_name,
            last_name,
            password,
        })
    }
}

fn read_email(fields: &mut Fields<'_>) -> Option<Email> {
    let raw = fields.string("email", Email::MAX_LENGTH)?;
    match Email::parse(&raw) {
        Ok(email) if email.has_required_domain() => Some(email),
        Ok(_) => {
            fields.add_error("email", messages::EMAIL_DOMAIN);
            None
        }
        Err(_) => {
            fields.add_error("email", messages::INVALID_EMAIL);
            None
        }
    }
}

fn read_name(fields: &mut Fields<'_>, name: &str) -> Option<PersonName> {
    let raw = fields.string(name, PersonName::MAX_LENGTH)?;
    match PersonName::parse(&raw) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            fields.add_error(name, messages::INVALID_NAME);
            None
        }
    }
}

fn read_password(fields: &mut Fields<'_>) -> Option<SecretString> {
    let raw = fields.untrimmed_string("password")?;
    if raw.chars().count() < PASSWORD_MIN_LENGTH {
        fields.add_error("password", messages::PASSWORD_TOO_SHORT);
        return None;
    }
    Some(SecretString::from(raw))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use hotel_booking_core::FieldErrors;

    use super::*;
    use crate::db::{MemoryStore, UserRepository};
    use crate::error::AppError;
    use crate::input::object;
    use crate::models::NewUser;

    fn payload(email: &str, first_name: &str, password: &str) -> Map<String, Value> {
        object(json!({
            "email": email,
            "first_name": first_name,
            "last_name": "Doe",
            "password": password,
        }))
    }

    fn errors_of(result: Result<Registration>) -> FieldErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_registration() {
        let store = MemoryStore::new();
        let registration =
            Registration::validate(&payload("test@gmail.com", "John", "password123"), &store)
                .await
                .unwrap();

        assert_eq!(registration.email.as_str(), "test@gmail.com");
        assert_eq!(registration.first_name.as_str(), "John");
        assert_eq!(registration.password.expose_secret(), "password123");
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let store = MemoryStore::new();
        let errors = errors_of(
            Registration::validate(&payload("test@gmail.com", "John#", "password123"), &store)
                .await,
        );
        assert_eq!(errors.get("first_name").unwrap(), [messages::INVALID_NAME]);
    }

    #[tokio::test]
    async fn test_email_domain() {
        let store = MemoryStore::new();
        let errors = errors_of(
            Registration::validate(&payload("test@example.com", "John", "password123"), &store)
                .await,
        );
        assert_eq!(errors.get("email").unwrap(), [messages::EMAIL_DOMAIN]);
    }

    #[tokio::test]
    async fn test_malformed_email() {
        let store = MemoryStore::new();
        let errors = errors_of(
            Registration::validate(&payload("not-an-email", "John", "password123"), &store).await,
        );
        assert_eq!(errors.get("email").unwrap(), [messages::INVALID_EMAIL]);
    }

    #[tokio::test]
    async fn test_short_password() {
        let store = MemoryStore::new();
        let errors = errors_of(
            Registration::validate(&payload("test@gmail.com", "John", "short"), &store).await,
        );
        assert_eq!(
            errors.get("password").unwrap(),
            [messages::PASSWORD_TOO_SHORT]
        );
    }

    #[tokio::test]
    async fn test_existing_email() {
        let store = MemoryStore::new();
        store
            .create_user(&NewUser {
                email: Email::parse("test@gmail.com").unwrap(),
                first_name: PersonName::parse("Jane").unwrap(),
                last_name: PersonName::parse("Doe").unwrap(),
                password_hash: "hash".to_owned(),
            })
            .await
            .unwrap();

        let errors = errors_of(
            Registration::validate(&payload("test@gmail.com", "John", "password123"), &store)
                .await,
        );
        assert_eq!(errors.get("email").unwrap(), [messages::EMAIL_TAKEN]);
    }
}
