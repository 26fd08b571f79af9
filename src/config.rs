// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management

use crate::auth::DEFAULT_TOKEN_EXPIRY_HOURS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Default HTTP port when `HTTP_PORT` is unset
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite:fitforge.db?mode=rwc";

/// Development-only fallback signing secret
const DEV_JWT_SECRET: &str = "dev-only-secret-change-in-production";

/// Environment type for configuration defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP listener binds to
    pub http_port: u16,
    /// Database connection string (SQLite)
    pub database_url: String,
    /// Process-wide JWT signing secret
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_expiry_hours: i64,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` or `JWT_EXPIRY_HOURS` are set but not
    /// parseable, or if `JWT_SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("Invalid HTTP_PORT: {value}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production")
            }
            _ => {
                warn!("JWT_SECRET not set, using development fallback secret");
                DEV_JWT_SECRET.into()
            }
        };

        let token_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(value) => value
                .parse::<i64>()
                .with_context(|| format!("Invalid JWT_EXPIRY_HOURS: {value}"))?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours,
            environment,
        })
    }

    /// One-line startup summary, secret-free
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={} token_expiry={}h",
            self.environment, self.http_port, self.database_url, self.token_expiry_hours
        )
    }
}
