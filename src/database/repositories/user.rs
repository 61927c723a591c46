//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, NewUser};
use crate::utils::errors::{unique_violation, EventsApiError};

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Username and email uniqueness is decided by the database; a unique
    /// violation on either column surfaces as [`EventsApiError::Uniqueness`].
    pub async fn create(&self, new_user: NewUser) -> Result<User, EventsApiError> {
        let now = Utc::now();
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, phone_number, password, is_staff, is_superuser, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, username, email, phone_number, password, is_active, is_staff, is_superuser, is_verified, otp, last_login, created_at, updated_at
            "#
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.phone_number)
        .bind(&new_user.password_hash)
        .bind(new_user.is_staff)
        .bind(new_user.is_superuser)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        result.map_err(|err| match unique_violation(&err).as_deref() {
            Some("users_username_key") => EventsApiError::Uniqueness {
                field: "username",
                value: new_user.username.clone(),
            },
            Some("users_email_key") => EventsApiError::Uniqueness {
                field: "email",
                value: new_user.email.clone(),
            },
            _ => EventsApiError::Database(err),
        })
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, EventsApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, phone_number, password, is_active, is_staff, is_superuser, is_verified, otp, last_login, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by (already normalized) email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, EventsApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, phone_number, password, is_active, is_staff, is_superuser, is_verified, otp, last_login, created_at, updated_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replace the stored password hash
    pub async fn set_password(&self, id: i64, password_hash: &str) -> Result<(), EventsApiError> {
        let result = sqlx::query("UPDATE users SET password = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventsApiError::not_found("User", id));
        }

        Ok(())
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, id: i64) -> Result<User, EventsApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET last_login = $2
            WHERE id = $1
            RETURNING id, username, email, phone_number, password, is_active, is_staff, is_superuser, is_verified, otp, last_login, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| EventsApiError::not_found("User", id))
    }

    /// Delete user; registrations and feedback go with it via `ON DELETE CASCADE`.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, EventsApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, EventsApiError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, phone_number, password, is_active, is_staff, is_superuser, is_verified, otp, last_login, created_at, updated_at FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, EventsApiError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
