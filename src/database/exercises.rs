// ABOUTME: Exercise catalog database operations
// ABOUTME: Handles the globally unique exercise names and category labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Exercise;
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    Ok(Exercise {
        id: parse_uuid(row.try_get("id").map_err(AppError::from)?)?,
        name: row.try_get("name").map_err(AppError::from)?,
        category: row.try_get("category").map_err(AppError::from)?,
    })
}

impl Database {
    /// Create the exercises table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                category TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Insert a new exercise
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the name is already taken, including when
    /// a concurrent create wins the unique-constraint race
    pub async fn create_exercise(
        &self,
        name: &str,
        category: Option<&str>,
    ) -> AppResult<Exercise> {
        if self.get_exercise_by_name(name).await?.is_some() {
            return Err(AppError::already_exists("Exercise name already exists"));
        }

        let exercise = Exercise {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            category: category.map(str::to_owned),
        };

        sqlx::query("INSERT INTO exercises (id, name, category) VALUES ($1, $2, $3)")
            .bind(exercise.id.to_string())
            .bind(&exercise.name)
            .bind(&exercise.category)
            .execute(self.pool())
            .await?;

        Ok(exercise)
    }

    /// Fetch an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_exercise).transpose()
    }

    /// Fetch an exercise by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise_by_name(&self, name: &str) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_exercise).transpose()
    }

    /// List the full exercise catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT * FROM exercises ORDER BY name")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_exercise).collect()
    }
}
