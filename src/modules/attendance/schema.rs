use serde::{Deserialize, Serialize};

// =============================================================================
// SESSION CREATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub class_id: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub qr_code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub class_id: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// SESSION DETAIL
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub qr_code: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub students: Vec<RosterEntry>,
    pub total_students: usize,
    pub present_count: usize,
    pub absent_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub has_marked_attendance: bool,
    pub photo_url: Option<String>,
    pub marked_at: Option<chrono::DateTime<chrono::Utc>>,
}

// =============================================================================
// MARKING
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: String,
    /// Optional base64-encoded JPEG captured at marking time.
    #[serde(default)]
    pub photo_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkAttendanceResponse {
    pub message: &'static str,
    pub photo_url: Option<String>,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// DELETION / NOTIFICATIONS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub message: &'static str,
    pub class_id: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub message: &'static str,
    pub sent: usize,
    pub failed: usize,
}
