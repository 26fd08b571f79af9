// ABOUTME: SQLite database connection management and schema migration
// ABOUTME: Provides the Database handle shared by all per-entity operation modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer
//!
//! A thin wrapper over an `sqlx` SQLite pool. Foreign keys are enabled on
//! every connection so cascade deletes and referential integrity are
//! enforced by the store itself, not just by handler-level checks.

mod exercises;
mod users;
mod workout_exercises;
mod workouts;

use crate::errors::AppResult;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run schema migration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid, the database
    /// cannot be opened, or migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// Wrap an already-connected pool (used by tests and the seed binary)
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create all tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_workout_exercises().await?;
        tracing::debug!("database schema migration complete");
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp column back into a UTC datetime
pub(crate) fn parse_rfc3339(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            crate::errors::AppError::database(format!("Invalid stored timestamp {value}: {e}"))
        })
}

/// Parse a TEXT uuid column
pub(crate) fn parse_uuid(value: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| crate::errors::AppError::database(format!("Invalid stored uuid {value}: {e}")))
}

pub use workout_exercises::NewWorkoutExercise;
pub use workouts::{NewWorkout, WorkoutUpdate};
