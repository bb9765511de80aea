use axum::http::StatusCode;

use crate::common::{test_email, TestContext, CLASSROOM_IP, DEVICE_A};

#[tokio::test]
async fn delete_unknown_student_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.delete("/api/students/no-such-student").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_cascades_to_attendance_logs() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.verified_student(&class_id, &test_email()).await;
    let session_id = ctx.create_session(&class_id, CLASSROOM_IP).await;

    ctx.mark(&session_id, &student_id, DEVICE_A, CLASSROOM_IP)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(ctx.store.logs.count().await, 1);

    let response = ctx
        .server
        .delete(&format!("/api/students/{student_id}"))
        .await;
    response.assert_status(StatusCode::OK);

    assert!(ctx.store.students.get(&student_id).await.is_none());
    assert_eq!(ctx.store.logs.count().await, 0);
}

#[tokio::test]
async fn delete_reports_the_removed_student() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;

    let response = ctx
        .server
        .delete(&format!("/api/students/{student_id}"))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["deleted_student"]["roll_no"], "42");
}
