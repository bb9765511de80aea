use chrono::{DateTime, Utc};

use crate::store::Document;

/// One faculty-initiated attendance window.
///
/// The creator's IP and subnet are captured once at creation and never
/// updated; the QR payload encodes the marking URL for this session.
#[derive(Debug, Clone)]
pub struct AttendanceSession {
    pub id: String,
    pub class_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub qr_code: String,
    pub ip_address: Option<String>,
    pub subnet: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for AttendanceSession {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Append-only record of one accepted marking. At most one entry exists
/// per (session, student) pair; the store's insert-if-absent enforces it.
#[derive(Debug, Clone)]
pub struct AttendanceLogEntry {
    pub id: String,
    pub session_id: String,
    pub student_id: String,
    pub device_id: String,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub photo_url: Option<String>,
}

impl Document for AttendanceLogEntry {
    fn id(&self) -> &str {
        &self.id
    }
}
