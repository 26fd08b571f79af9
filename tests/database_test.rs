// ABOUTME: Database layer tests over an in-memory SQLite store
// ABOUTME: Covers per-entity CRUD, uniqueness conflicts, and cascade deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fitforge::database::{Database, NewWorkout, NewWorkoutExercise, WorkoutUpdate};
use fitforge::errors::ErrorCode;
use fitforge::models::User;
use uuid::Uuid;

async fn seeded_user(database: &Database, username: &str) -> User {
    let user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "$2b$12$fixed-test-hash".to_string(),
    );
    database.create_user(&user).await.unwrap();
    user
}

#[tokio::test]
async fn test_file_backed_database_creation_and_remigration() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());

    let database = Database::new(&url).await.unwrap();
    let alice = seeded_user(&database, "alice").await;
    assert!(database.get_user(alice.id).await.unwrap().is_some());

    // Re-running migration against an existing schema is a no-op
    database.migrate().await.unwrap();
    assert!(database.get_user(alice.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_user_crud_and_uniqueness() {
    let database = common::create_test_database().await.unwrap();
    let alice = seeded_user(&database, "alice").await;

    let loaded = database.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(loaded.username, "alice");
    assert_eq!(loaded.email, "alice@example.com");
    assert_eq!(loaded.password_hash, alice.password_hash);

    let by_name = database.get_user_by_username("alice").await.unwrap();
    assert!(by_name.is_some());
    assert!(database
        .get_user_by_username("nobody")
        .await
        .unwrap()
        .is_none());

    // Same username again
    let dup = User::new(
        "alice".to_string(),
        "other@example.com".to_string(),
        "hash".to_string(),
    );
    let err = database.create_user(&dup).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    assert!(database.delete_user(alice.id).await.unwrap());
    assert!(!database.delete_user(alice.id).await.unwrap());
}

#[tokio::test]
async fn test_workout_create_list_and_ordering() {
    let database = common::create_test_database().await.unwrap();
    let alice = seeded_user(&database, "alice").await;
    let bob = seeded_user(&database, "bob").await;

    for duration in [15, 25, 35] {
        let new = NewWorkout {
            workout_type: "Running".to_string(),
            duration,
            calories_burned: None,
            notes: None,
        };
        database.create_workout(alice.id, &new).await.unwrap();
    }
    database
        .create_workout(
            bob.id,
            &NewWorkout {
                workout_type: "Cycling".to_string(),
                duration: 60,
                calories_burned: Some(600),
                notes: None,
            },
        )
        .await
        .unwrap();

    let listed = database.list_workouts_for_user(alice.id).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|w| w.user_id == alice.id));
    assert!(listed.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

#[tokio::test]
async fn test_workout_partial_update_merges_fields() {
    let database = common::create_test_database().await.unwrap();
    let alice = seeded_user(&database, "alice").await;

    let workout = database
        .create_workout(
            alice.id,
            &NewWorkout {
                workout_type: "Running".to_string(),
                duration: 30,
                calories_burned: Some(300),
                notes: Some("Morning run".to_string()),
            },
        )
        .await
        .unwrap();

    let updated = database
        .update_workout(
            workout.id,
            &WorkoutUpdate {
                workout_type: None,
                duration: Some(45),
                calories_burned: None,
                notes: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.duration, 45);
    assert_eq!(updated.workout_type, "Running");
    assert_eq!(updated.calories_burned, Some(300));
    assert_eq!(updated.notes.as_deref(), Some("Morning run"));
    assert_eq!(updated.date, workout.date);
    assert_eq!(updated.user_id, alice.id);

    // An explicit inner None clears a nullable field instead of keeping it
    let cleared = database
        .update_workout(
            workout.id,
            &WorkoutUpdate {
                workout_type: None,
                duration: None,
                calories_burned: Some(None),
                notes: Some(None),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.calories_burned, None);
    assert_eq!(cleared.notes, None);
    assert_eq!(cleared.duration, 45);

    let missing = database
        .update_workout(Uuid::new_v4(), &WorkoutUpdate::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_exercise_uniqueness_and_name_lookup() {
    let database = common::create_test_database().await.unwrap();

    let created = database
        .create_exercise("Push-ups", Some("Strength"))
        .await
        .unwrap();
    assert_eq!(created.name, "Push-ups");
    assert_eq!(created.category.as_deref(), Some("Strength"));

    let err = database
        .create_exercise("Push-ups", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let by_name = database.get_exercise_by_name("Push-ups").await.unwrap();
    assert_eq!(by_name.unwrap().id, created.id);

    database.create_exercise("Burpees", None).await.unwrap();
    let listed = database.list_exercises().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Burpees", "Push-ups"]);
}

#[tokio::test]
async fn test_association_listing_embeds_exercise() {
    let database = common::create_test_database().await.unwrap();
    let alice = seeded_user(&database, "alice").await;

    let workout = database
        .create_workout(
            alice.id,
            &NewWorkout {
                workout_type: "Strength Training".to_string(),
                duration: 45,
                calories_burned: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    let exercise = database
        .create_exercise("Push-ups", Some("Strength"))
        .await
        .unwrap();

    database
        .create_workout_exercise(&NewWorkoutExercise {
            workout_id: workout.id,
            exercise_id: exercise.id,
            sets: Some(3),
            reps: Some(15),
            weight: None,
        })
        .await
        .unwrap();

    let listed = database.list_workout_exercises(workout.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].sets, Some(3));
    assert_eq!(listed[0].reps, Some(15));
    let embedded = listed[0].exercise.as_ref().unwrap();
    assert_eq!(embedded.name, "Push-ups");
    assert_eq!(embedded.category.as_deref(), Some("Strength"));
}

#[tokio::test]
async fn test_cascade_deletes_flow_through_both_levels() {
    let database = common::create_test_database().await.unwrap();
    let alice = seeded_user(&database, "alice").await;

    let workout = database
        .create_workout(
            alice.id,
            &NewWorkout {
                workout_type: "Strength Training".to_string(),
                duration: 45,
                calories_burned: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    let exercise = database.create_exercise("Push-ups", None).await.unwrap();
    let association = database
        .create_workout_exercise(&NewWorkoutExercise {
            workout_id: workout.id,
            exercise_id: exercise.id,
            sets: None,
            reps: None,
            weight: None,
        })
        .await
        .unwrap();

    // Deleting the user removes the workout, which removes the association
    assert!(database.delete_user(alice.id).await.unwrap());
    assert!(database.get_workout(workout.id).await.unwrap().is_none());
    assert!(database
        .get_workout_exercise(association.id)
        .await
        .unwrap()
        .is_none());

    // The catalog entry is untouched
    assert!(database.get_exercise(exercise.id).await.unwrap().is_some());
}
