use std::sync::Arc;

use attendance_server::services::mailer::Mailer;
use attendance_server::services::photos::MemoryPhotoStore;
use attendance_server::store::{init_store, StoreHandle};
use axum_test::TestServer;
use serde_json::json;

// Fixed request identities used across scenarios.
#[allow(dead_code)]
pub const DEVICE_A: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) TestClient/1.0";
#[allow(dead_code)]
pub const DEVICE_B: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) TestClient/1.0";
#[allow(dead_code)]
pub const CLASSROOM_IP: &str = "192.168.1.5";
#[allow(dead_code)]
pub const CLASSROOM_IP_OTHER_HOST: &str = "192.168.1.50";
#[allow(dead_code)]
pub const OUTSIDE_IP: &str = "10.0.0.5";

#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub store: StoreHandle,
    pub photos: Arc<MemoryPhotoStore>,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        let store = init_store();
        let photos = Arc::new(MemoryPhotoStore::new());
        let app = attendance_server::create_app(
            store.clone(),
            Arc::new(Mailer::disabled()),
            photos.clone(),
            "http://localhost:5173".to_string(),
        )
        .await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            store,
            photos,
        }
    }

    pub async fn create_class(&self) -> String {
        let response = self
            .server
            .post("/api/classes")
            .json(&json!({ "name": "Physics 101", "faculty_id": "faculty-test" }))
            .await;
        response.json::<serde_json::Value>()["id"]
            .as_str()
            .expect("class id")
            .to_string()
    }

    pub async fn enroll_student(&self, class_id: &str, email: &str) -> String {
        let response = self
            .server
            .post("/api/students")
            .json(&json!({
                "name": "Test Student",
                "roll_no": "42",
                "class_id": class_id,
                "email": email,
                "parent_email": "parent@example.com"
            }))
            .await;
        response.json::<serde_json::Value>()["student"]["id"]
            .as_str()
            .expect("student id")
            .to_string()
    }

    /// The verification token travels by email in production; tests read it
    /// straight from the store.
    pub async fn verification_token(&self, student_id: &str) -> String {
        let student = self
            .store
            .students
            .get(student_id)
            .await
            .expect("student exists");
        student.verification_token.expect("token outstanding")
    }

    /// Redeem the student's token from the given device and IP, binding
    /// that identity.
    pub async fn verify_student(&self, student_id: &str, user_agent: &str, ip: &str) {
        let token = self.verification_token(student_id).await;
        let response = self
            .server
            .post(&format!("/api/students/verify/{token}"))
            .add_header("user-agent", user_agent)
            .add_header("x-forwarded-for", ip)
            .await;
        assert_eq!(response.status_code().as_u16(), 200, "verification failed");
    }

    pub async fn create_session(&self, class_id: &str, creator_ip: &str) -> String {
        let response = self
            .server
            .post("/api/attendance")
            .add_header("x-forwarded-for", creator_ip)
            .json(&json!({
                "class_id": class_id,
                "scheduled_at": "2026-03-01T09:00:00Z"
            }))
            .await;
        response.json::<serde_json::Value>()["session_id"]
            .as_str()
            .expect("session id")
            .to_string()
    }

    pub async fn mark(
        &self,
        session_id: &str,
        student_id: &str,
        user_agent: &str,
        ip: &str,
    ) -> axum_test::TestResponse {
        self.server
            .post(&format!("/api/attendance/{session_id}/mark"))
            .add_header("user-agent", user_agent)
            .add_header("x-forwarded-for", ip)
            .json(&json!({ "student_id": student_id }))
            .await
    }

    /// Enroll + verify a student bound to DEVICE_A on the classroom subnet.
    pub async fn verified_student(&self, class_id: &str, email: &str) -> String {
        let student_id = self.enroll_student(class_id, email).await;
        self.verify_student(&student_id, DEVICE_A, CLASSROOM_IP).await;
        student_id
    }
}

#[allow(dead_code)]
pub fn test_email() -> String {
    format!("student_{}@example.com", uuid::Uuid::new_v4())
}
