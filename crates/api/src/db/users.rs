//! User repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use hotel_booking_core::{Email, UserId};

use super::{PgStore, RepositoryError, map_write_error};
use crate::models::{NewUser, User};

/// User persistence operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Get a user together with their password hash, for login.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    async fn create_user(&self, new: &NewUser) -> Result<User, RepositoryError>;

    /// Delete a user and, by cascade, their reservations.
    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError>;
}

/// Row type for the login query.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    email: Email,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    password_hash: String,
}

#[async_trait]
impl UserRepository for PgStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, email, first_name, last_name, created_at
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, email, first_name, last_name, created_at
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r"
            SELECT id, email, first_name, last_name, created_at, password_hash
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    email: r.email,
                    first_name: r.first_name,
                    last_name: r.last_name,
                    created_at: r.created_at,
                },
                r.password_hash,
            )
        }))
    }

    async fn create_user(&self, new: &NewUser) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, first_name, last_name, created_at
            ",
        )
        .bind(&new.email)
        .bind(new.first_name.as_str())
        .bind(new.last_name.as_str())
        .bind(&new.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_write_error(e, |_| "user"))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
