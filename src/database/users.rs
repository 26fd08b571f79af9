// ABOUTME: User management database operations
// ABOUTME: Handles user rows, uniqueness checks, and cascading account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_rfc3339, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: parse_uuid(row.try_get("id").map_err(AppError::from)?)?,
        username: row.try_get("username").map_err(AppError::from)?,
        email: row.try_get("email").map_err(AppError::from)?,
        password_hash: row.try_get("password_hash").map_err(AppError::from)?,
        created_at: parse_rfc3339(row.try_get("created_at").map_err(AppError::from)?)?,
    })
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the username or email is already taken,
    /// including when a concurrent registration wins the unique-constraint race
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_username(&user.username).await?.is_some() {
            return Err(AppError::already_exists("Username already taken"));
        }
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(user.id)
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Fetch a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Fetch a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// List all users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_user).collect()
    }

    /// Update a user's email address
    ///
    /// # Errors
    ///
    /// Returns a conflict error if another account already uses the email,
    /// or a query error on failure
    pub async fn update_user_email(&self, id: Uuid, email: &str) -> AppResult<Option<User>> {
        if let Some(existing) = self.get_user_by_email(email).await? {
            if existing.id != id {
                return Err(AppError::already_exists("Email already registered"));
            }
        }

        let result = sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
            .bind(id.to_string())
            .bind(email)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_user(id).await
    }

    /// Delete a user; workouts and their associations cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
