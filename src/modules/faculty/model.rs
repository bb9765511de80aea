use chrono::{DateTime, Utc};

use crate::store::Document;

#[derive(Debug, Clone)]
pub struct Faculty {
    pub id: String,
    /// Identifier issued by the external auth provider the frontend signs
    /// in with; faculty registration is idempotent on it.
    pub auth_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Document for Faculty {
    fn id(&self) -> &str {
        &self.id
    }
}
