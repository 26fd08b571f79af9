// ABOUTME: Exercise catalog route handlers
// ABOUTME: Public listing and authenticated creation of uniquely named exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise routes
//!
//! The catalog is readable without authentication; creating an entry
//! requires a valid token.

use super::authenticate;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Exercise creation request
#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Exercise routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/exercises", get(Self::handle_list))
            .route("/exercises", post(Self::handle_create))
            .with_state(resources)
    }

    /// Handle GET /exercises - List the full catalog (no auth)
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let exercises = resources.database.list_exercises().await?;
        Ok((StatusCode::OK, Json(exercises)).into_response())
    }

    /// Handle POST /exercises - Create a new catalog entry
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateExerciseRequest>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let name = body
            .name
            .ok_or_else(|| AppError::invalid_input("name is required"))?;
        let name = crate::validation::validate_exercise_name(&name)?;

        let exercise = resources
            .database
            .create_exercise(&name, body.category.as_deref())
            .await?;

        tracing::info!(exercise_id = %exercise.id, name = %exercise.name, "exercise created");
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }
}
