// ABOUTME: Demo data seeder for the FitForge API
// ABOUTME: Populates users, exercises, workouts, and associations for local testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo data seeder for FitForge.
//!
//! Populates the database with a small set of users, an exercise catalog,
//! and a week of workouts with exercise associations.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database, clearing existing rows first
//! cargo run --bin seed-demo-data -- --database-url sqlite:fitforge.db?mode=rwc --reset
//! ```

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use fitforge::auth::hash_password;
use fitforge::config::DEFAULT_DATABASE_URL;
use fitforge::database::{Database, NewWorkout, NewWorkoutExercise};
use fitforge::models::User;
use std::env;
use tracing::info;
use uuid::Uuid;

/// Shared password for all demo users, allows login for testing
const DEMO_USER_PASSWORD: &str = "password123";

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "FitForge demo data seeder",
    long_about = "Populate the database with demo users, exercises, and workouts"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Clear all existing rows before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

struct DemoUser {
    username: &'static str,
    email: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "fitness_fan",
        email: "fan@example.com",
    },
    DemoUser {
        username: "gym_rat",
        email: "gym@example.com",
    },
    DemoUser {
        username: "yoga_lover",
        email: "yoga@example.com",
    },
    DemoUser {
        username: "runner123",
        email: "runner@example.com",
    },
];

const DEMO_EXERCISES: &[(&str, &str)] = &[
    ("Push-ups", "Strength"),
    ("Squats", "Strength"),
    ("Running", "Cardio"),
    ("Cycling", "Cardio"),
    ("Yoga Flow", "Flexibility"),
    ("Plank", "Core"),
    ("Bench Press", "Strength"),
    ("Deadlift", "Strength"),
    ("Jumping Jacks", "Cardio"),
    ("Stretching", "Flexibility"),
];

/// (owner index, type, duration, calories, notes)
const DEMO_WORKOUTS: &[(usize, &str, i32, i32, &str)] = &[
    (0, "Strength Training", 45, 400, "Chest and triceps day"),
    (0, "Cardio", 30, 300, "Morning run"),
    (1, "Cycling", 60, 600, "Long bike ride"),
    (1, "Weight Training", 50, 450, "Leg day"),
    (2, "Yoga", 60, 200, "Evening yoga flow"),
    (2, "Pilates", 45, 250, "Core workout"),
    (3, "HIIT", 25, 350, "High intensity training"),
    (3, "Walking", 40, 180, "Evening walk"),
];

/// (workout index, exercise index, sets, reps, weight)
const DEMO_ASSOCIATIONS: &[(usize, usize, i32, i32, Option<f64>)] = &[
    (0, 0, 3, 15, None),
    (0, 6, 4, 10, Some(65.0)),
    (1, 2, 1, 30, None),
    (2, 3, 1, 60, None),
    (3, 1, 5, 12, Some(85.0)),
    (3, 7, 4, 8, Some(120.0)),
    (4, 4, 1, 60, None),
    (4, 9, 1, 20, None),
    (5, 5, 3, 60, None),
    (6, 8, 5, 20, None),
    (6, 0, 4, 15, None),
    (7, 2, 1, 40, None),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    info!("Seeding demo data into {database_url}");
    let database = Database::new(&database_url).await?;

    if args.reset {
        clear_existing_data(&database).await?;
    }

    let user_ids = seed_users(&database).await?;
    let exercise_ids = seed_exercises(&database).await?;
    let workout_ids = seed_workouts(&database, &user_ids).await?;
    let association_count = seed_associations(&database, &workout_ids, &exercise_ids).await?;

    info!(
        "Seeded {} users, {} exercises, {} workouts, and {association_count} associations",
        user_ids.len(),
        exercise_ids.len(),
        workout_ids.len()
    );
    Ok(())
}

/// Delete all rows, children first so foreign keys never block
async fn clear_existing_data(database: &Database) -> Result<()> {
    info!("Clearing existing data");
    sqlx::query("DELETE FROM workout_exercises")
        .execute(database.pool())
        .await?;
    sqlx::query("DELETE FROM workouts")
        .execute(database.pool())
        .await?;
    sqlx::query("DELETE FROM exercises")
        .execute(database.pool())
        .await?;
    sqlx::query("DELETE FROM users")
        .execute(database.pool())
        .await?;
    Ok(())
}

async fn seed_users(database: &Database) -> Result<Vec<Uuid>> {
    // One hash shared by every demo account; bcrypt is deliberately slow
    let password_hash = tokio::task::spawn_blocking(|| hash_password(DEMO_USER_PASSWORD)).await??;

    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        if let Some(existing) = database.get_user_by_username(demo.username).await? {
            info!("User {} already exists, reusing", demo.username);
            ids.push(existing.id);
            continue;
        }

        let user = User::new(
            demo.username.to_string(),
            demo.email.to_string(),
            password_hash.clone(),
        );
        let id = database.create_user(&user).await?;
        info!("Created user {} ({id})", demo.username);
        ids.push(id);
    }
    Ok(ids)
}

async fn seed_exercises(database: &Database) -> Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(DEMO_EXERCISES.len());
    for (name, category) in DEMO_EXERCISES {
        if let Some(existing) = database.get_exercise_by_name(name).await? {
            ids.push(existing.id);
            continue;
        }

        let exercise = database.create_exercise(name, Some(*category)).await?;
        info!("Created exercise {name}");
        ids.push(exercise.id);
    }
    Ok(ids)
}

async fn seed_workouts(database: &Database, user_ids: &[Uuid]) -> Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(DEMO_WORKOUTS.len());
    for (i, (owner, workout_type, duration, calories, notes)) in DEMO_WORKOUTS.iter().enumerate() {
        let new = NewWorkout {
            workout_type: (*workout_type).to_string(),
            duration: *duration,
            calories_burned: Some(*calories),
            notes: Some((*notes).to_string()),
        };
        let workout = database.create_workout(user_ids[*owner], &new).await?;

        // Stagger workouts across the past week
        let date = Utc::now() - Duration::days(i64::try_from(i)? % 7);
        sqlx::query("UPDATE workouts SET date = ?1 WHERE id = ?2")
            .bind(date.to_rfc3339())
            .bind(workout.id.to_string())
            .execute(database.pool())
            .await?;

        info!("Created workout {workout_type} for user {owner}");
        ids.push(workout.id);
    }
    Ok(ids)
}

async fn seed_associations(
    database: &Database,
    workout_ids: &[Uuid],
    exercise_ids: &[Uuid],
) -> Result<usize> {
    for (workout, exercise, sets, reps, weight) in DEMO_ASSOCIATIONS {
        let new = NewWorkoutExercise {
            workout_id: workout_ids[*workout],
            exercise_id: exercise_ids[*exercise],
            sets: Some(*sets),
            reps: Some(*reps),
            weight: *weight,
        };
        database.create_workout_exercise(&new).await?;
    }
    Ok(DEMO_ASSOCIATIONS.len())
}
