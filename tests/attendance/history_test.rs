use axum::http::StatusCode;

use crate::common::{test_email, TestContext, CLASSROOM_IP, DEVICE_A};

#[tokio::test]
async fn history_shows_present_and_absent_sessions() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.verified_student(&class_id, &test_email()).await;

    let attended = ctx.create_session(&class_id, CLASSROOM_IP).await;
    let skipped = ctx.create_session(&class_id, CLASSROOM_IP).await;

    ctx.mark(&attended, &student_id, DEVICE_A, CLASSROOM_IP)
        .await
        .assert_status(StatusCode::OK);

    let response = ctx
        .server
        .get(&format!("/api/students/{student_id}/history"))
        .await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 2);

    let entry_for = |id: &str| {
        history
            .iter()
            .find(|e| e["session_id"] == id)
            .cloned()
            .unwrap()
    };
    let present = entry_for(&attended);
    assert_eq!(present["status"], "present");
    assert!(present["marked_at"].is_string());

    let absent = entry_for(&skipped);
    assert_eq!(absent["status"], "absent");
    assert!(absent["marked_at"].is_null());
}

#[tokio::test]
async fn history_for_unknown_student_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/students/no-such-student/history").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
