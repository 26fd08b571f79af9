// ABOUTME: Workout-exercise association database operations
// ABOUTME: Handles the join rows carrying per-association sets/reps/weight payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, WorkoutExercise, WorkoutExerciseResponse};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Fields required to insert an association row
#[derive(Debug, Clone)]
pub struct NewWorkoutExercise {
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
}

fn row_to_association(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    Ok(WorkoutExercise {
        id: parse_uuid(row.try_get("id").map_err(AppError::from)?)?,
        sets: row.try_get("sets").map_err(AppError::from)?,
        reps: row.try_get("reps").map_err(AppError::from)?,
        weight: row.try_get("weight").map_err(AppError::from)?,
        workout_id: parse_uuid(row.try_get("workout_id").map_err(AppError::from)?)?,
        exercise_id: parse_uuid(row.try_get("exercise_id").map_err(AppError::from)?)?,
    })
}

impl Database {
    /// Create the workout_exercises table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_workout_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                sets INTEGER,
                reps INTEGER,
                weight REAL,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout
             ON workout_exercises(workout_id)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_exercise
             ON workout_exercises(exercise_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Insert an association row
    ///
    /// The caller is responsible for owner and existence checks; the schema
    /// foreign keys still reject a dangling workout or exercise reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout_exercise(
        &self,
        new: &NewWorkoutExercise,
    ) -> AppResult<WorkoutExercise> {
        let association = WorkoutExercise {
            id: Uuid::new_v4(),
            sets: new.sets,
            reps: new.reps,
            weight: new.weight,
            workout_id: new.workout_id,
            exercise_id: new.exercise_id,
        };

        sqlx::query(
            r"
            INSERT INTO workout_exercises (id, sets, reps, weight, workout_id, exercise_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(association.id.to_string())
        .bind(association.sets)
        .bind(association.reps)
        .bind(association.weight)
        .bind(association.workout_id.to_string())
        .bind(association.exercise_id.to_string())
        .execute(self.pool())
        .await?;

        Ok(association)
    }

    /// Fetch an association by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_workout_exercise(&self, id: Uuid) -> AppResult<Option<WorkoutExercise>> {
        let row = sqlx::query("SELECT * FROM workout_exercises WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_association).transpose()
    }

    /// List a workout's associations with each exercise projection embedded
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workout_exercises(
        &self,
        workout_id: Uuid,
    ) -> AppResult<Vec<WorkoutExerciseResponse>> {
        let rows = sqlx::query(
            r"
            SELECT we.id, we.sets, we.reps, we.weight, we.workout_id, we.exercise_id,
                   e.name AS exercise_name, e.category AS exercise_category
            FROM workout_exercises we
            LEFT JOIN exercises e ON e.id = we.exercise_id
            WHERE we.workout_id = $1
            ORDER BY we.id
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let association = row_to_association(row)?;
                let exercise = row
                    .try_get::<Option<String>, _>("exercise_name")
                    .map_err(AppError::from)?
                    .map(|name| {
                        Ok::<Exercise, AppError>(Exercise {
                            id: association.exercise_id,
                            name,
                            category: row.try_get("exercise_category").map_err(AppError::from)?,
                        })
                    })
                    .transpose()?;
                Ok(WorkoutExerciseResponse::from_parts(association, exercise))
            })
            .collect()
    }

    /// Delete an association by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_workout_exercise(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workout_exercises WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
