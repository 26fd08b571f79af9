// ABOUTME: HTTP integration tests for workout routes
// ABOUTME: Covers validation boundaries, ownership enforcement, and list ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use fitforge::resources::ServerResources;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use std::sync::Arc;

struct WorkoutTestSetup {
    app: axum::Router,
    resources: Arc<ServerResources>,
    token: String,
}

impl WorkoutTestSetup {
    async fn new() -> Self {
        let resources = common::create_test_resources().await.unwrap();
        let app = fitforge::routes::router(resources.clone());
        let (_, token) = common::create_test_user(&resources, "alice").await.unwrap();
        Self {
            app,
            resources,
            token,
        }
    }

    async fn create_workout(&self, body: &Value) -> helpers::axum_test::AxumTestResponse {
        AxumTestRequest::post("/workouts")
            .bearer(&self.token)
            .json(body)
            .send(self.app.clone())
            .await
    }
}

#[tokio::test]
async fn test_create_workout_assigns_server_side_fields() {
    let setup = WorkoutTestSetup::new().await;

    let response = setup
        .create_workout(&json!({
            "type": "Running",
            "duration": 30,
            "calories_burned": 300,
            "notes": "Morning run"
        }))
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["type"], "Running");
    assert_eq!(body["duration"], 30);
    assert_eq!(body["calories_burned"], 300);
    assert_eq!(body["notes"], "Morning run");
    assert!(body["id"].is_string());
    assert!(body["date"].is_string());
    assert!(body["user_id"].is_string());
    assert_eq!(body["exercises"], json!([]));
}

#[tokio::test]
async fn test_create_workout_ignores_client_supplied_owner() {
    let setup = WorkoutTestSetup::new().await;
    let (other, _) = common::create_test_user(&setup.resources, "mallory")
        .await
        .unwrap();

    // user_id in the body is not a recognized field and must not take effect
    let response = setup
        .create_workout(&json!({
            "type": "Running",
            "duration": 30,
            "user_id": other.id
        }))
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_ne!(body["user_id"], json!(other.id.to_string()));
}

#[tokio::test]
async fn test_duration_boundaries() {
    let setup = WorkoutTestSetup::new().await;

    let zero = setup
        .create_workout(&json!({"type": "Running", "duration": 0}))
        .await;
    assert_eq!(zero.status(), 400);

    let negative = setup
        .create_workout(&json!({"type": "Running", "duration": -5}))
        .await;
    assert_eq!(negative.status(), 400);

    let one = setup
        .create_workout(&json!({"type": "Running", "duration": 1}))
        .await;
    assert_eq!(one.status(), 201);

    let max = setup
        .create_workout(&json!({"type": "Running", "duration": 360}))
        .await;
    assert_eq!(max.status(), 201);

    let over = setup
        .create_workout(&json!({"type": "Running", "duration": 361}))
        .await;
    assert_eq!(over.status(), 400);
}

#[tokio::test]
async fn test_create_workout_rejects_missing_and_invalid_fields() {
    let setup = WorkoutTestSetup::new().await;

    let no_type = setup.create_workout(&json!({"duration": 30})).await;
    assert_eq!(no_type.status(), 400);

    let no_duration = setup.create_workout(&json!({"type": "Running"})).await;
    assert_eq!(no_duration.status(), 400);

    let short_type = setup
        .create_workout(&json!({"type": "R", "duration": 30}))
        .await;
    assert_eq!(short_type.status(), 400);

    let negative_calories = setup
        .create_workout(&json!({"type": "Running", "duration": 30, "calories_burned": -1}))
        .await;
    assert_eq!(negative_calories.status(), 400);
}

#[tokio::test]
async fn test_list_is_owner_scoped_and_date_descending() {
    let setup = WorkoutTestSetup::new().await;
    let (_, bob_token) = common::create_test_user(&setup.resources, "bob")
        .await
        .unwrap();

    for duration in [10, 20, 30] {
        let response = setup
            .create_workout(&json!({"type": "Running", "duration": duration}))
            .await;
        assert_eq!(response.status(), 201);
    }
    let bob_workout = AxumTestRequest::post("/workouts")
        .bearer(&bob_token)
        .json(&json!({"type": "Cycling", "duration": 45}))
        .send(setup.app.clone())
        .await;
    assert_eq!(bob_workout.status(), 201);

    let response = AxumTestRequest::get("/workouts")
        .bearer(&setup.token)
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 3);
    for workout in &body {
        assert_ne!(workout["type"], "Cycling");
    }
    let dates: Vec<chrono::DateTime<chrono::Utc>> = body
        .iter()
        .map(|w| w["date"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_get_update_delete_require_ownership() {
    let setup = WorkoutTestSetup::new().await;
    let (_, bob_token) = common::create_test_user(&setup.resources, "bob")
        .await
        .unwrap();

    let created: Value = setup
        .create_workout(&json!({"type": "Running", "duration": 30}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_owned();

    let get = AxumTestRequest::get(&format!("/workouts/{id}"))
        .bearer(&bob_token)
        .send(setup.app.clone())
        .await;
    assert_eq!(get.status(), 403);

    let patch = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&bob_token)
        .json(&json!({"duration": 60}))
        .send(setup.app.clone())
        .await;
    assert_eq!(patch.status(), 403);

    let delete = AxumTestRequest::delete(&format!("/workouts/{id}"))
        .bearer(&bob_token)
        .send(setup.app.clone())
        .await;
    assert_eq!(delete.status(), 403);

    // The rejected mutations must not have taken effect
    let still_there = AxumTestRequest::get(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .send(setup.app.clone())
        .await;
    assert_eq!(still_there.status(), 200);
    let body: Value = still_there.json();
    assert_eq!(body["duration"], 30);
}

#[tokio::test]
async fn test_partial_update_merges_and_validates() {
    let setup = WorkoutTestSetup::new().await;

    let created: Value = setup
        .create_workout(&json!({
            "type": "Running",
            "duration": 30,
            "calories_burned": 300,
            "notes": "Morning run"
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .json(&json!({"duration": 45}))
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["duration"], 45);
    // Untouched fields survive the partial update
    assert_eq!(body["type"], "Running");
    assert_eq!(body["calories_burned"], 300);
    assert_eq!(body["notes"], "Morning run");
    assert_eq!(body["date"], created["date"]);

    let invalid = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .json(&json!({"duration": 0}))
        .send(setup.app.clone())
        .await;
    assert_eq!(invalid.status(), 400);
}

#[tokio::test]
async fn test_update_with_explicit_null_clears_optional_fields() {
    let setup = WorkoutTestSetup::new().await;

    let created: Value = setup
        .create_workout(&json!({
            "type": "Running",
            "duration": 30,
            "calories_burned": 300,
            "notes": "Morning run"
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .json(&json!({"notes": null}))
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["notes"], Value::Null);
    // The absent key keeps its value; only the explicit null clears
    assert_eq!(body["calories_burned"], 300);

    let response = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .json(&json!({"calories_burned": null}))
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["calories_burned"], Value::Null);
}

#[tokio::test]
async fn test_update_cannot_reassign_owner_or_date() {
    let setup = WorkoutTestSetup::new().await;
    let (other, _) = common::create_test_user(&setup.resources, "mallory")
        .await
        .unwrap();

    let created: Value = setup
        .create_workout(&json!({"type": "Running", "duration": 30}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::patch(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .json(&json!({
            "duration": 45,
            "user_id": other.id,
            "date": "2000-01-01T00:00:00Z"
        }))
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["user_id"], created["user_id"]);
    assert_eq!(body["date"], created["date"]);
}

#[tokio::test]
async fn test_delete_workout_returns_204_then_404() {
    let setup = WorkoutTestSetup::new().await;

    let created: Value = setup
        .create_workout(&json!({"type": "Running", "duration": 30}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_owned();

    let delete = AxumTestRequest::delete(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .send(setup.app.clone())
        .await;
    assert_eq!(delete.status(), 204);

    let get = AxumTestRequest::get(&format!("/workouts/{id}"))
        .bearer(&setup.token)
        .send(setup.app.clone())
        .await;
    assert_eq!(get.status(), 404);
}

#[tokio::test]
async fn test_unknown_workout_is_404() {
    let setup = WorkoutTestSetup::new().await;

    let response = AxumTestRequest::get(&format!("/workouts/{}", uuid::Uuid::new_v4()))
        .bearer(&setup.token)
        .send(setup.app.clone())
        .await;
    assert_eq!(response.status(), 404);
}
