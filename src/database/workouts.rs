// ABOUTME: Workout database operations
// ABOUTME: Handles workout rows, per-user listing, partial updates, and cascade deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_rfc3339, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Workout;
use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Fields required to insert a workout; `id`, `date`, and `user_id` are
/// assigned by the server, never taken from the request body
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub workout_type: String,
    pub duration: i32,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
}

/// Explicit allow-list of workout fields mutable via update
///
/// `id`, `user_id`, and `date` are deliberately absent so a partial update
/// can never touch them. The nullable fields use a double `Option`: the
/// outer `None` keeps the current value, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct WorkoutUpdate {
    pub workout_type: Option<String>,
    pub duration: Option<i32>,
    pub calories_burned: Option<Option<i32>>,
    pub notes: Option<Option<String>>,
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: parse_uuid(row.try_get("id").map_err(AppError::from)?)?,
        workout_type: row.try_get("workout_type").map_err(AppError::from)?,
        duration: row.try_get("duration").map_err(AppError::from)?,
        calories_burned: row.try_get("calories_burned").map_err(AppError::from)?,
        notes: row.try_get("notes").map_err(AppError::from)?,
        date: parse_rfc3339(row.try_get("date").map_err(AppError::from)?)?,
        user_id: parse_uuid(row.try_get("user_id").map_err(AppError::from)?)?,
    })
}

impl Database {
    /// Create the workouts table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                workout_type TEXT NOT NULL,
                duration INTEGER NOT NULL,
                calories_burned INTEGER,
                notes TEXT,
                date TEXT NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Insert a workout for a user with a server-assigned date
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout(&self, user_id: Uuid, new: &NewWorkout) -> AppResult<Workout> {
        let workout = Workout {
            id: Uuid::new_v4(),
            workout_type: new.workout_type.clone(),
            duration: new.duration,
            calories_burned: new.calories_burned,
            notes: new.notes.clone(),
            date: Utc::now(),
            user_id,
        };

        sqlx::query(
            r"
            INSERT INTO workouts (id, workout_type, duration, calories_burned, notes, date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(workout.id.to_string())
        .bind(&workout.workout_type)
        .bind(workout.duration)
        .bind(workout.calories_burned)
        .bind(&workout.notes)
        .bind(workout.date.to_rfc3339())
        .bind(workout.user_id.to_string())
        .execute(self.pool())
        .await?;

        Ok(workout)
    }

    /// Fetch a workout by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_workout(&self, id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query("SELECT * FROM workouts WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_workout).transpose()
    }

    /// List a user's workouts, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workouts_for_user(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query("SELECT * FROM workouts WHERE user_id = $1 ORDER BY date DESC, id")
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Apply a partial update to a workout and return the new row
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn update_workout(
        &self,
        id: Uuid,
        update: &WorkoutUpdate,
    ) -> AppResult<Option<Workout>> {
        let Some(current) = self.get_workout(id).await? else {
            return Ok(None);
        };

        let workout_type = update
            .workout_type
            .clone()
            .unwrap_or(current.workout_type);
        let duration = update.duration.unwrap_or(current.duration);
        let calories_burned = update
            .calories_burned
            .unwrap_or(current.calories_burned);
        let notes = update.notes.clone().unwrap_or(current.notes);

        sqlx::query(
            r"
            UPDATE workouts
            SET workout_type = $2, duration = $3, calories_burned = $4, notes = $5
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(&workout_type)
        .bind(duration)
        .bind(calories_burned)
        .bind(&notes)
        .execute(self.pool())
        .await?;

        self.get_workout(id).await
    }

    /// Delete a workout; its associations cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_workout(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
