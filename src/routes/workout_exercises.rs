// ABOUTME: Workout-exercise association route handlers
// ABOUTME: Creates and deletes join rows with ownership derived from the parent workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout-exercise association routes
//!
//! Ownership is derived through the parent workout: both creation and
//! deletion require the workout's owner to match the authenticated
//! identity. The referenced exercise is existence-checked before insert so
//! a dangling `exercise_id` is rejected as validation failure instead of
//! relying solely on the schema's foreign key.

use super::authenticate;
use crate::database::NewWorkoutExercise;
use crate::errors::AppError;
use crate::models::WorkoutExerciseResponse;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Association creation request
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutExerciseRequest {
    pub workout_id: Option<Uuid>,
    pub exercise_id: Option<Uuid>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
}

/// Workout-exercise routes handler
pub struct WorkoutExerciseRoutes;

impl WorkoutExerciseRoutes {
    /// Create all association routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workout-exercises", post(Self::handle_create))
            .route("/workout-exercises/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /workout-exercises - Attach an exercise to an owned workout
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWorkoutExerciseRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let workout_id = body
            .workout_id
            .ok_or_else(|| AppError::invalid_input("workout_id is required"))?;
        let exercise_id = body
            .exercise_id
            .ok_or_else(|| AppError::invalid_input("exercise_id is required"))?;

        let workout = resources
            .database
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| {
                AppError::invalid_input("workout_id does not reference an existing workout")
            })?;

        if workout.user_id != auth.user_id {
            return Err(AppError::forbidden(
                "You do not have access to this workout",
            ));
        }

        let exercise = resources
            .database
            .get_exercise(exercise_id)
            .await?
            .ok_or_else(|| {
                AppError::invalid_input("exercise_id does not reference an existing exercise")
            })?;

        let new = NewWorkoutExercise {
            workout_id,
            exercise_id,
            sets: crate::validation::validate_sets(body.sets)?,
            reps: crate::validation::validate_reps(body.reps)?,
            weight: crate::validation::validate_weight(body.weight)?,
        };

        let association = resources.database.create_workout_exercise(&new).await?;
        tracing::info!(
            association_id = %association.id,
            workout_id = %workout_id,
            exercise_id = %exercise_id,
            "workout exercise created"
        );

        let response = WorkoutExerciseResponse::from_parts(association, Some(exercise));
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /workout-exercises/:id - Remove an association from an owned workout
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let association = resources
            .database
            .get_workout_exercise(id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout exercise"))?;

        // Ownership derives from the parent workout
        let workout = resources
            .database
            .get_workout(association.workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        if workout.user_id != auth.user_id {
            return Err(AppError::forbidden(
                "You do not have access to this workout",
            ));
        }

        resources.database.delete_workout_exercise(id).await?;
        tracing::info!(association_id = %id, "workout exercise deleted");

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
