// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Provides in-memory database, auth manager, and server resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)] // Each integration test binary uses a subset of these helpers

use anyhow::Result;
use fitforge::auth::AuthManager;
use fitforge::config::{Environment, ServerConfig};
use fitforge::database::Database;
use fitforge::models::User;
use fitforge::resources::ServerResources;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::Once;

pub const TEST_JWT_SECRET: &[u8] = b"test_jwt_secret_for_integration_tests";

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Create a migrated in-memory test database
///
/// Uses a single-connection pool so every query sees the same in-memory
/// database; a larger pool would hand each connection its own empty store.
pub async fn create_test_database() -> Result<Database> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    let database = Database::from_pool(pool);
    database.migrate().await?;
    Ok(database)
}

/// Create a test auth manager with the shared test secret
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, 1)
}

/// Create an auth manager whose tokens are already expired when issued
pub fn create_expired_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, -1)
}

pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8081,
        database_url: "sqlite::memory:".into(),
        jwt_secret: String::from_utf8_lossy(TEST_JWT_SECRET).into_owned(),
        token_expiry_hours: 1,
        environment: Environment::Testing,
    }
}

/// Create full server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
        create_test_config(),
    )))
}

/// Insert a user directly and return it along with a valid session token
pub async fn create_test_user(
    resources: &Arc<ServerResources>,
    username: &str,
) -> Result<(User, String)> {
    let password_hash = fitforge::auth::hash_password("password123")?;
    let user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        password_hash,
    );
    resources.database.create_user(&user).await?;

    let token = resources.auth_manager.generate_token(&user)?;
    Ok((user, token))
}
