use chrono::{DateTime, Utc};

use crate::store::Document;

/// A student enrolled in one class.
///
/// Verification is a one-way transition: the record is created unverified
/// holding a single-use token; redeeming the token sets `is_verified`,
/// binds the device fingerprint and subnet observed on the redeeming
/// request, and clears the token. None of those fields change again.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub class_id: String,
    pub email: String,
    pub parent_email: String,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verified_device_id: Option<String>,
    pub verified_ip_address: Option<String>,
    pub verified_subnet: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for Student {
    fn id(&self) -> &str {
        &self.id
    }
}
