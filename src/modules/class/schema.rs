use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, message = "Class name must not be empty"))]
    pub name: String,
    pub faculty_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClassResponse {
    pub id: String,
    pub name: String,
    pub faculty_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
