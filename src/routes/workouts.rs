// ABOUTME: Workout resource route handlers with per-user ownership enforcement
// ABOUTME: Lists, creates, updates, and deletes workouts scoped to the token's user
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout routes
//!
//! Listing returns only the authenticated user's workouts, most recent
//! first. Get/update/delete load by id and require the owner to match the
//! authenticated identity before anything else happens; the owner check
//! always precedes any mutation.

use super::{authenticate, AuthenticatedUser};
use crate::database::{NewWorkout, WorkoutUpdate};
use crate::errors::AppError;
use crate::models::{Workout, WorkoutResponse};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Workout creation request; `user_id` comes from the token, never the body
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<i32>,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
}

/// Explicit allow-list of workout fields mutable via update
///
/// `id`, `user_id`, and `date` are not expressible here, so a partial
/// update can never touch them. The nullable fields distinguish an absent
/// key (keep the current value) from an explicit `null` (clear it).
#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub calories_burned: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub notes: Option<Option<String>>,
}

/// Deserialize a present-but-possibly-null field as `Some(inner)`; serde's
/// `default` supplies the outer `None` when the key is absent entirely
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", get(Self::handle_list))
            .route("/workouts", post(Self::handle_create))
            .route("/workouts/:id", get(Self::handle_get))
            .route("/workouts/:id", patch(Self::handle_update))
            .route("/workouts/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Load a workout and verify the caller owns it
    async fn load_owned(
        resources: &Arc<ServerResources>,
        auth: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<Workout, AppError> {
        let workout = resources
            .database
            .get_workout(id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        if workout.user_id != auth.user_id {
            return Err(AppError::forbidden(
                "You do not have access to this workout",
            ));
        }
        Ok(workout)
    }

    /// Build the full projection for one workout
    async fn to_response(
        resources: &Arc<ServerResources>,
        workout: Workout,
    ) -> Result<WorkoutResponse, AppError> {
        let exercises = resources.database.list_workout_exercises(workout.id).await?;
        Ok(WorkoutResponse::from_parts(workout, exercises))
    }

    /// Handle GET /workouts - List the caller's workouts, date descending
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let workouts = resources
            .database
            .list_workouts_for_user(auth.user_id)
            .await?;

        let mut response = Vec::with_capacity(workouts.len());
        for workout in workouts {
            response.push(Self::to_response(&resources, workout).await?);
        }

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /workouts - Create a workout for the authenticated user
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let workout_type = body
            .workout_type
            .ok_or_else(|| AppError::invalid_input("type is required"))?;
        let duration = body
            .duration
            .ok_or_else(|| AppError::invalid_input("duration is required"))?;

        let new = NewWorkout {
            workout_type: crate::validation::validate_workout_type(&workout_type)?,
            duration: crate::validation::validate_duration(duration)?,
            calories_burned: crate::validation::validate_calories(body.calories_burned)?,
            notes: body.notes,
        };

        let workout = resources.database.create_workout(auth.user_id, &new).await?;
        tracing::info!(workout_id = %workout.id, user_id = %auth.user_id, "workout created");

        let response = Self::to_response(&resources, workout).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /workouts/:id - Get one owned workout
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let workout = Self::load_owned(&resources, &auth, id).await?;

        let response = Self::to_response(&resources, workout).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /workouts/:id - Partially update an owned workout
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<UpdateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        Self::load_owned(&resources, &auth, id).await?;

        let update = WorkoutUpdate {
            workout_type: body
                .workout_type
                .as_deref()
                .map(crate::validation::validate_workout_type)
                .transpose()?,
            duration: body
                .duration
                .map(crate::validation::validate_duration)
                .transpose()?,
            calories_burned: body
                .calories_burned
                .map(crate::validation::validate_calories)
                .transpose()?,
            notes: body.notes,
        };

        let workout = resources
            .database
            .update_workout(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        let response = Self::to_response(&resources, workout).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /workouts/:id - Delete an owned workout and its associations
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        Self::load_owned(&resources, &auth, id).await?;

        resources.database.delete_workout(id).await?;
        tracing::info!(workout_id = %id, user_id = %auth.user_id, "workout deleted");

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
