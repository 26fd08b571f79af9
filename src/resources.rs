// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Holds the database, auth manager, and config shared by all handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Constructed once
//! in the binary and passed to every handler through axum `State`; nothing
//! in the crate reaches for ambient global state.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }
}
