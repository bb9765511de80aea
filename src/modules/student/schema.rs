use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// ENROLLMENT
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct EnrollStudentRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Roll number must not be empty"))]
    pub roll_no: String,
    pub class_id: String,
    #[validate(email(message = "Invalid student email format"))]
    pub email: String,
    #[validate(email(message = "Invalid parent email format"))]
    pub parent_email: String,
}

#[derive(Debug, Serialize)]
pub struct EnrollStudentResponse {
    pub message: &'static str,
    pub student: StudentResponse,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub class_id: String,
    pub email: String,
    pub parent_email: String,
    pub is_verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// VERIFICATION
// =============================================================================

#[derive(Debug, Serialize)]
pub struct VerifyStudentResponse {
    pub message: &'static str,
}

// =============================================================================
// DELETION
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DeleteStudentResponse {
    pub message: &'static str,
    pub deleted_student: DeletedStudent,
}

#[derive(Debug, Serialize)]
pub struct DeletedStudent {
    pub name: String,
    pub roll_no: String,
    pub email: String,
}

// =============================================================================
// ATTENDANCE HISTORY
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub session_id: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub status: &'static str,
    pub marked_at: Option<chrono::DateTime<chrono::Utc>>,
}
