// ABOUTME: User resource route handlers for list, get, update, and delete
// ABOUTME: Requires a valid token; account deletion cascades to owned workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User routes
//!
//! All operations require a valid token but no ownership check beyond that;
//! this matches the documented contract (any authenticated caller may read
//! or mutate any account).

use super::authenticate;
use crate::errors::AppError;
use crate::models::UserResponse;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Explicit allow-list of user fields mutable via update
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", get(Self::handle_list))
            .route("/users/:id", get(Self::handle_get))
            .route("/users/:id", patch(Self::handle_update))
            .route("/users/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /users - List all users' public projections
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let users = resources.database.list_users().await?;
        let response: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /users/:id - Get one user's public projection
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(UserResponse::from(user))).into_response())
    }

    /// Handle PATCH /users/:id - Update a user's email
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
        Json(body): Json<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let email = body
            .email
            .ok_or_else(|| AppError::invalid_input("email is required"))?;
        let email = crate::validation::validate_email(&email)?;

        let user = resources
            .database
            .update_user_email(id, &email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(UserResponse::from(user))).into_response())
    }

    /// Handle DELETE /users/:id - Delete a user and cascade to their workouts
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let deleted = resources.database.delete_user(id).await?;
        if !deleted {
            return Err(AppError::not_found("User"));
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
