use axum::http::StatusCode;

use crate::common::{test_email, TestContext, CLASSROOM_IP, DEVICE_A};

#[tokio::test]
async fn redeeming_token_binds_device_and_network() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;

    ctx.verify_student(&student_id, DEVICE_A, CLASSROOM_IP).await;

    let student = ctx.store.students.get(&student_id).await.unwrap();
    assert!(student.is_verified);
    assert!(student.verification_token.is_none());
    assert_eq!(
        student.verified_device_id.as_deref(),
        Some(attendance_server::services::fingerprint::device_id(DEVICE_A).as_str())
    );
    assert_eq!(student.verified_subnet.as_deref(), Some("192.168.1.0"));
    assert_eq!(student.verified_ip_address.as_deref(), Some(CLASSROOM_IP));
}

#[tokio::test]
async fn token_redeems_exactly_once() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;
    let token = ctx.verification_token(&student_id).await;

    let first = ctx
        .server
        .post(&format!("/api/students/verify/{token}"))
        .add_header("user-agent", DEVICE_A)
        .add_header("x-forwarded-for", CLASSROOM_IP)
        .await;
    first.assert_status(StatusCode::OK);

    // The token was cleared by the first redemption; a replay finds no
    // holder.
    let replay = ctx
        .server
        .post(&format!("/api/students/verify/{token}"))
        .add_header("user-agent", DEVICE_A)
        .add_header("x-forwarded-for", CLASSROOM_IP)
        .await;
    replay.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = replay.json();
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn unknown_token_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/students/verify/deadbeef")
        .add_header("user-agent", DEVICE_A)
        .add_header("x-forwarded-for", CLASSROOM_IP)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_redemptions_have_one_winner() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;
    let token = ctx.verification_token(&student_id).await;
    let path = format!("/api/students/verify/{token}");

    let (res1, res2, res3) = tokio::join!(
        ctx.server
            .post(&path)
            .add_header("user-agent", DEVICE_A)
            .add_header("x-forwarded-for", CLASSROOM_IP),
        ctx.server
            .post(&path)
            .add_header("user-agent", DEVICE_A)
            .add_header("x-forwarded-for", CLASSROOM_IP),
        ctx.server
            .post(&path)
            .add_header("user-agent", DEVICE_A)
            .add_header("x-forwarded-for", CLASSROOM_IP),
    );

    let successes = [&res1, &res2, &res3]
        .iter()
        .filter(|r| r.status_code() == StatusCode::OK)
        .count();
    assert_eq!(successes, 1, "exactly one redemption must win");

    let student = ctx.store.students.get(&student_id).await.unwrap();
    assert!(student.is_verified);
    assert!(student.verification_token.is_none());
}

#[tokio::test]
async fn redemption_without_classifiable_network_is_rejected() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;
    let token = ctx.verification_token(&student_id).await;

    // No forwarding headers, so no network identity can be derived.
    let response = ctx
        .server
        .post(&format!("/api/students/verify/{token}"))
        .add_header("user-agent", DEVICE_A)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "network_unavailable");

    // The token stays outstanding and the student stays unverified, so a
    // retry from a usable network still works.
    let student = ctx.store.students.get(&student_id).await.unwrap();
    assert!(!student.is_verified);
    assert!(student.verification_token.is_some());

    ctx.verify_student(&student_id, DEVICE_A, CLASSROOM_IP).await;
    let student = ctx.store.students.get(&student_id).await.unwrap();
    assert!(student.is_verified);
    assert!(student.verified_subnet.is_some());
}

#[tokio::test]
async fn verification_binds_subnet_not_exact_ip() {
    let ctx = TestContext::new().await;
    let class_id = ctx.create_class().await;
    let student_id = ctx.enroll_student(&class_id, &test_email()).await;

    ctx.verify_student(&student_id, DEVICE_A, "172.16.9.200").await;

    let student = ctx.store.students.get(&student_id).await.unwrap();
    assert_eq!(student.verified_subnet.as_deref(), Some("172.16.9.0"));
}
