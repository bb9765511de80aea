use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn register_faculty_then_fetch_by_auth_id() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/faculty")
        .json(&json!({
            "auth_id": "auth-abc",
            "name": "Dr. Grace Hopper",
            "email": "grace@example.edu"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = ctx.server.get("/api/faculty/auth-abc").await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Dr. Grace Hopper");
}

#[tokio::test]
async fn register_is_idempotent_on_auth_id() {
    let ctx = TestContext::new().await;
    let body = json!({
        "auth_id": "auth-abc",
        "name": "Dr. Grace Hopper",
        "email": "grace@example.edu"
    });

    ctx.server.post("/api/faculty").json(&body).await;
    let response = ctx.server.post("/api/faculty").json(&body).await;

    response.assert_status(StatusCode::OK);
    let parsed: serde_json::Value = response.json();
    assert_eq!(parsed["message"], "Faculty already exists");
    assert_eq!(ctx.store.faculty.count().await, 1);
}

#[tokio::test]
async fn unknown_faculty_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/faculty/nobody").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn classes_are_listed_per_faculty() {
    let ctx = TestContext::new().await;

    for name in ["Physics 101", "Chemistry 201"] {
        ctx.server
            .post("/api/classes")
            .json(&json!({ "name": name, "faculty_id": "auth-abc" }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    ctx.server
        .post("/api/classes")
        .json(&json!({ "name": "Biology 301", "faculty_id": "someone-else" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.server.get("/api/faculty/auth-abc/classes").await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}
