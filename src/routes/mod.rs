// ABOUTME: HTTP route assembly and shared authentication extraction
// ABOUTME: Merges per-resource routers and applies tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes
//!
//! One module per resource, each exposing a `routes(Arc<ServerResources>)`
//! constructor. [`router`] merges them into the full application router with
//! request ids, request tracing, and a permissive CORS layer.

pub mod auth;
pub mod exercises;
pub mod health;
pub mod users;
pub mod workout_exercises;
pub mod workouts;

use crate::auth::Claims;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Identity extracted from a validated bearer token
#[derive(Debug)]
pub struct AuthenticatedUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Full token claims
    pub claims: Claims,
}

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes())
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(users::UserRoutes::routes(resources.clone()))
        .merge(workouts::WorkoutRoutes::routes(resources.clone()))
        .merge(exercises::ExerciseRoutes::routes(resources.clone()))
        .merge(workout_exercises::WorkoutExerciseRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Extract and validate the bearer token from request headers
///
/// Missing, malformed, invalid, and expired tokens all map to the one
/// uniform 401 body from [`AppError::unauthorized`]; the reason is logged
/// but never sent to the client.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthenticatedUser> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!("authorization header is not a bearer token");
        AppError::unauthorized()
    })?;

    let claims = resources.auth_manager.validate_token(token)?;
    let user_id = claims.user_id()?;

    Ok(AuthenticatedUser { user_id, claims })
}
