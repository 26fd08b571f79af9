// ABOUTME: Domain entities for users, workouts, exercises, and their associations
// ABOUTME: Includes public response projections that never expose password hashes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models
//!
//! Each entity has two shapes: the full persisted record and a serialized
//! projection returned over HTTP. Projections omit the password hash and any
//! back-reference that would recreate a serialization cycle (a workout's
//! embedded associations never re-embed the parent workout).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique username used for login
    pub username: String,
    /// Unique email address
    pub email: String,
    /// bcrypt password hash, never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and creation timestamp
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a user (id, username, email only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// A single workout session owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Workout type label, e.g. "Cardio" or "Strength Training"
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Duration in minutes (1-360)
    pub duration: i32,
    /// Estimated calories burned, if tracked
    pub calories_burned: Option<i32>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Server-assigned timestamp, defaults to insertion time
    pub date: DateTime<Utc>,
    /// Owning user
    pub user_id: Uuid,
}

/// An exercise in the shared catalog, referenced by workout associations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique exercise identifier
    pub id: Uuid,
    /// Unique exercise name
    pub name: String,
    /// Optional category label, e.g. "Cardio", "Strength", "Flexibility"
    pub category: Option<String>,
}

/// One exercise's performance parameters within one workout
///
/// The many-to-many join carries user-submitted payload (sets/reps/weight),
/// so it is modeled as a first-class entity rather than a plain junction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique association identifier
    pub id: Uuid,
    /// Number of sets performed, if tracked (>0)
    pub sets: Option<i32>,
    /// Repetitions per set, if tracked (>0)
    pub reps: Option<i32>,
    /// Weight in kg/lbs, if tracked (>=0)
    pub weight: Option<f64>,
    /// Parent workout
    pub workout_id: Uuid,
    /// Referenced exercise
    pub exercise_id: Uuid,
}

/// Association projection with its exercise embedded, back-reference free
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExerciseResponse {
    pub id: Uuid,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    /// The referenced exercise, if it still resolves
    pub exercise: Option<Exercise>,
}

impl WorkoutExerciseResponse {
    /// Build the projection from an association and its resolved exercise
    #[must_use]
    pub fn from_parts(association: WorkoutExercise, exercise: Option<Exercise>) -> Self {
        Self {
            id: association.id,
            sets: association.sets,
            reps: association.reps,
            weight: association.weight,
            workout_id: association.workout_id,
            exercise_id: association.exercise_id,
            exercise,
        }
    }
}

/// Workout projection with its association rows embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration: i32,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub user_id: Uuid,
    /// Exercises performed in this workout, each with its parameters
    pub exercises: Vec<WorkoutExerciseResponse>,
}

impl WorkoutResponse {
    /// Build the projection from a workout and its resolved associations
    #[must_use]
    pub fn from_parts(workout: Workout, exercises: Vec<WorkoutExerciseResponse>) -> Self {
        Self {
            id: workout.id,
            workout_type: workout.workout_type,
            duration: workout.duration,
            calories_burned: workout.calories_burned,
            notes: workout.notes,
            date: workout.date,
            user_id: workout.user_id,
            exercises,
        }
    }
}
