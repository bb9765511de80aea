use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFacultyRequest {
    pub auth_id: String,
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct FacultyResponse {
    pub id: String,
    pub auth_id: String,
    pub name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct RegisterFacultyResponse {
    pub message: &'static str,
    pub faculty: FacultyResponse,
}
