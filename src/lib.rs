// ABOUTME: Main library entry point for the FitForge fitness tracking backend
// ABOUTME: Exposes REST API modules for users, workouts, exercises, and associations
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # FitForge
//!
//! A fitness-tracking backend exposing user accounts, workouts, exercises,
//! and a many-to-many workout-exercise association with per-association
//! attributes (sets/reps/weight), behind a token-authenticated REST interface.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Domain entities and their public response projections
//! - **Validation**: Pure per-field validators run before every write
//! - **Database**: `SQLite`-backed persistence with cascading deletes
//! - **Auth**: bcrypt password hashing and `HS256` `JWT` session tokens
//! - **Routes**: Stateless axum handlers, one router per resource
//! - **Resources**: Explicit dependency container passed to every handler
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitforge::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitForge configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// `JWT` token issuance/validation and password hashing
pub mod auth;

/// Environment-based server configuration
pub mod config;

/// `SQLite` persistence layer and per-entity operations
pub mod database;

/// Unified error codes, `AppError`, and `HTTP` error responses
pub mod errors;

/// Structured logging setup built on `tracing`
pub mod logging;

/// Domain entities and serialized projections
pub mod models;

/// Shared resource container for dependency injection
pub mod resources;

/// `HTTP` route handlers, one module per resource
pub mod routes;

/// Field-level domain validation
pub mod validation;
