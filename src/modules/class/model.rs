use chrono::{DateTime, Utc};

use crate::store::Document;

#[derive(Debug, Clone)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub faculty_id: String,
    pub created_at: DateTime<Utc>,
}

impl Document for Class {
    fn id(&self) -> &str {
        &self.id
    }
}
