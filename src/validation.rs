// ABOUTME: Field-level domain validation for user, workout, and exercise input
// ABOUTME: Pure functions returning normalized values or a 400-class AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain validation rules
//!
//! Pure functions, one per field, each returning the normalized value or an
//! [`AppError`] carrying a human-readable message. Every validator runs
//! before any persistence write so a rejected field never leaves partial
//! state behind.

use crate::errors::{AppError, AppResult, ErrorCode};

/// Minimum username length after trimming
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;
/// Minimum workout type length after trimming
pub const MIN_WORKOUT_TYPE_LEN: usize = 2;
/// Minimum exercise name length after trimming
pub const MIN_EXERCISE_NAME_LEN: usize = 2;
/// Inclusive duration bounds in minutes
pub const DURATION_RANGE: std::ops::RangeInclusive<i32> = 1..=360;

/// Validate and normalize a username
///
/// # Errors
///
/// Returns an error if the trimmed username is shorter than 3 characters
pub fn validate_username(username: &str) -> AppResult<String> {
    let trimmed = username.trim();
    if trimmed.len() < MIN_USERNAME_LEN {
        return Err(AppError::invalid_input(
            "Username must be at least 3 characters long",
        ));
    }
    Ok(trimmed.to_owned())
}

/// Validate and normalize an email address
///
/// # Errors
///
/// Returns an error if the email does not contain an `@`
pub fn validate_email(email: &str) -> AppResult<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(AppError::invalid_input("Invalid email format"));
    }
    Ok(trimmed.to_owned())
}

/// Validate a plaintext password before hashing
///
/// # Errors
///
/// Returns an error if the password is shorter than 6 characters
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid_input(
            "Password must be at least 6 characters long",
        ));
    }
    Ok(())
}

/// Validate and normalize a workout type label
///
/// # Errors
///
/// Returns an error if the trimmed type is shorter than 2 characters
pub fn validate_workout_type(workout_type: &str) -> AppResult<String> {
    let trimmed = workout_type.trim();
    if trimmed.len() < MIN_WORKOUT_TYPE_LEN {
        return Err(AppError::invalid_input(
            "Workout type must be at least 2 characters long",
        ));
    }
    Ok(trimmed.to_owned())
}

/// Validate a workout duration in minutes (1-360 inclusive)
///
/// # Errors
///
/// Returns an error if the duration is outside 1..=360
pub fn validate_duration(duration: i32) -> AppResult<i32> {
    if duration <= 0 {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            "Duration must be positive",
        ));
    }
    if !DURATION_RANGE.contains(&duration) {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            "Duration too long (max 360 minutes)",
        ));
    }
    Ok(duration)
}

/// Validate an optional calories-burned count
///
/// # Errors
///
/// Returns an error if calories is present and negative
pub fn validate_calories(calories: Option<i32>) -> AppResult<Option<i32>> {
    if let Some(value) = calories {
        if value < 0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                "Calories burned cannot be negative",
            ));
        }
    }
    Ok(calories)
}

/// Validate and normalize an exercise name
///
/// # Errors
///
/// Returns an error if the trimmed name is shorter than 2 characters
pub fn validate_exercise_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_EXERCISE_NAME_LEN {
        return Err(AppError::invalid_input(
            "Exercise name must be at least 2 characters long",
        ));
    }
    Ok(trimmed.to_owned())
}

/// Validate an optional set count (>0 when present)
///
/// # Errors
///
/// Returns an error if sets is present and not positive
pub fn validate_sets(sets: Option<i32>) -> AppResult<Option<i32>> {
    if let Some(value) = sets {
        if value <= 0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                "Sets must be positive",
            ));
        }
    }
    Ok(sets)
}

/// Validate an optional rep count (>0 when present)
///
/// # Errors
///
/// Returns an error if reps is present and not positive
pub fn validate_reps(reps: Option<i32>) -> AppResult<Option<i32>> {
    if let Some(value) = reps {
        if value <= 0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                "Reps must be positive",
            ));
        }
    }
    Ok(reps)
}

/// Validate an optional weight (non-negative when present)
///
/// # Errors
///
/// Returns an error if weight is present and negative
pub fn validate_weight(weight: Option<f64>) -> AppResult<Option<f64>> {
    if let Some(value) = weight {
        if value < 0.0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                "Weight cannot be negative",
            ));
        }
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_trimmed_and_length_checked() {
        assert_eq!(validate_username("  alice  ").unwrap(), "alice");
        assert!(validate_username("ab").is_err());
        assert!(validate_username("  ab  ").is_err());
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert_eq!(validate_email(" a@x.com ").unwrap(), "a@x.com");
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_duration_boundaries() {
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(-5).is_err());
        assert!(validate_duration(361).is_err());
        assert_eq!(validate_duration(1).unwrap(), 1);
        assert_eq!(validate_duration(360).unwrap(), 360);
    }

    #[test]
    fn test_optional_fields_pass_through_none() {
        assert_eq!(validate_calories(None).unwrap(), None);
        assert_eq!(validate_sets(None).unwrap(), None);
        assert_eq!(validate_reps(None).unwrap(), None);
        assert_eq!(validate_weight(None).unwrap(), None);
    }

    #[test]
    fn test_sets_reps_must_be_positive() {
        assert!(validate_sets(Some(0)).is_err());
        assert!(validate_reps(Some(-1)).is_err());
        assert_eq!(validate_sets(Some(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_weight_non_negative() {
        assert!(validate_weight(Some(-0.5)).is_err());
        assert_eq!(validate_weight(Some(0.0)).unwrap(), Some(0.0));
    }
}
