// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Handles bcrypt credential checks, token generation, and token validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication and Session Management
//!
//! This module provides bcrypt password hashing and `HS256` JWT session
//! tokens signed with a process-wide secret. Token validation distinguishes
//! expired, invalid, and malformed tokens internally for logging; all three
//! surface to clients as the same 401 response so the error shape does not
//! leak token state.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session token lifetime in hours
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// A fixed bcrypt hash verified against when a login names an unknown user,
/// so the response latency matches the wrong-password path
const DUMMY_PASSWORD_HASH: &str = "$2b$12$C6UzMDM.H6dfI/f/IKcEeO5oBB1C1Nl1u0GiHtQKX0QOMyVpW1Gz2";

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(
                    f,
                    "JWT token expired at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        // The variant distinction stays in the logs; clients always see the
        // same 401 body regardless of why the token was rejected
        tracing::debug!("rejecting request: {error}");
        Self::unauthorized()
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Username for log context
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into a user id
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a valid `UUID`
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| {
            tracing::warn!(subject = %self.sub, "token subject is not a valid user id");
            AppError::unauthorized()
        })
    }
}

/// Authentication manager for `JWT` tokens and password credentials
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager with a process-wide signing secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Generate a signed `HS256` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// When the current tokens expire, for login responses
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Validate a token signature and expiry, returning its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, carries an
    /// invalid signature, or is not valid JWT format
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        tracing::debug!(user = %token_data.claims.sub, "JWT token validated");
        Ok(token_data.claims)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired {
                expired_at: Utc::now(),
            },
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Hash a password with bcrypt at the default cost
///
/// # Errors
///
/// Returns an error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    Ok(hash)
}

/// Verify a password against a stored bcrypt hash
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let valid = bcrypt::verify(password, password_hash)?;
    Ok(valid)
}

/// Burn one bcrypt verification against a fixed hash
///
/// Used on the login path when no account matches the submitted username so
/// the unknown-user and wrong-password cases take comparable time.
pub fn verify_dummy_password(password: &str) {
    let _ = bcrypt::verify(password, DUMMY_PASSWORD_HASH);
}
