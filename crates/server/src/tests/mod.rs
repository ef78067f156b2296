// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod config_tests;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use secret_draw_domain::DrawOptions;
use secret_draw_persistence::Persistence;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

/// Helper to create test app state with in-memory persistence and a fixed seed.
fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(11))),
        draw_options: DrawOptions::default(),
    })
}

/// Sends one request and returns the status with the decoded JSON body.
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body: Body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Creates a pool with one group per entry and returns the pool's JSON.
async fn create_pool_with_groups(app: &Router, groups: &[&[&str]]) -> Value {
    let (status, pool) = send(
        app,
        "POST",
        "/pools",
        Some(serde_json::json!({ "name": "Holiday" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pool_id: String = pool["pool_id"].as_str().unwrap().to_string();

    for names in groups {
        let (status, group) = send(app, "POST", &format!("/pools/{pool_id}/groups"), None).await;
        assert_eq!(status, StatusCode::OK);
        let group_id: i64 = group["group_id"].as_i64().unwrap();

        for name in *names {
            let (status, _) = send(
                app,
                "POST",
                &format!("/groups/{group_id}/participants"),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    let (_, pool) = send(app, "GET", &format!("/pools/{pool_id}"), None).await;
    pool
}

/// Finds a participant's identifier by name in a pool's JSON.
fn participant_id(pool: &Value, name: &str) -> String {
    pool["groups"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|group| group["participants"].as_array().unwrap().iter())
        .find(|participant| participant["name"] == name)
        .and_then(|participant| participant["participant_id"].as_str())
        .unwrap()
        .to_string()
}
