// ABOUTME: User registration and login route handlers
// ABOUTME: Issues bcrypt-hashed accounts and HS256 session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication routes
//!
//! Registration and login are the only unauthenticated write endpoints.
//! Login deliberately returns the same 401 for an unknown username and a
//! wrong password, and burns a dummy bcrypt verification in the unknown-user
//! case so the two are not separable by latency.

use crate::auth;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserResponse};
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create registration and login routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .with_state(resources)
    }

    fn require_field(value: Option<String>, field: &str) -> AppResult<String> {
        match value {
            None => Err(AppError::invalid_input(format!("{field} is required"))),
            Some(v) if v.is_empty() => Err(AppError::invalid_input(format!(
                "{field} must not be empty"
            ))),
            Some(v) => Ok(v),
        }
    }

    /// Handle POST /register - Create a new user account
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let username = Self::require_field(body.username, "username")?;
        let email = Self::require_field(body.email, "email")?;
        let password = Self::require_field(body.password, "password")?;

        let username = crate::validation::validate_username(&username)?;
        let email = crate::validation::validate_email(&email)?;
        crate::validation::validate_password(&password)?;

        // bcrypt is CPU-bound; keep it off the async executor
        let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let user = User::new(username, email, password_hash);
        resources.database.create_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
    }

    /// Handle POST /login - Verify credentials and issue a session token
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let username = Self::require_field(body.username, "username")?;
        let password = Self::require_field(body.password, "password")?;

        let Some(user) = resources.database.get_user_by_username(&username).await? else {
            // Equalize timing with the wrong-password path
            tokio::task::spawn_blocking(move || auth::verify_dummy_password(&password))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || auth::verify_password(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!(username = %username, "login rejected");
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        let token = resources.auth_manager.generate_token(&user)?;
        let expires_at = resources.auth_manager.token_expiry();

        tracing::info!(user_id = %user.id, username = %user.username, "user logged in");

        Ok((
            StatusCode::OK,
            Json(LoginResponse {
                token,
                expires_at: expires_at.to_rfc3339(),
                user: UserResponse::from(user),
            }),
        )
            .into_response())
    }
}
