use crate::modules::attendance::model::{AttendanceLogEntry, AttendanceSession};
use crate::store::{StoreError, StoreHandle};

pub struct AttendanceCrud {
    store: StoreHandle,
}

impl AttendanceCrud {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    // -- sessions ---------------------------------------------------------

    pub async fn create_session(&self, session: AttendanceSession) {
        self.store.sessions.insert(session).await;
    }

    pub async fn get_session(&self, id: &str) -> Option<AttendanceSession> {
        self.store.sessions.get(id).await
    }

    pub async fn sessions_by_class(&self, class_id: &str) -> Vec<AttendanceSession> {
        let mut sessions = self
            .store
            .sessions
            .find_all(|s| s.class_id == class_id)
            .await;
        sessions.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        sessions
    }

    /// Delete a session and cascade to its log entries.
    pub async fn delete_session(&self, id: &str) -> Option<AttendanceSession> {
        let session = self.store.sessions.delete(id).await?;
        let removed = self.store.logs.delete_where(|l| l.session_id == id).await;
        tracing::debug!(session_id = id, removed, "cascaded session log entries");
        Some(session)
    }

    // -- log entries ------------------------------------------------------

    pub async fn log_exists(&self, session_id: &str, student_id: &str) -> bool {
        self.store
            .logs
            .exists(|l| l.session_id == session_id && l.student_id == student_id)
            .await
    }

    /// Append a log entry. The (session_id, student_id) uniqueness check and
    /// the insert run under one write lock; of two racing appends for the
    /// same pair exactly one succeeds.
    pub async fn append_log(&self, entry: AttendanceLogEntry) -> Result<(), StoreError> {
        let session_id = entry.session_id.clone();
        let student_id = entry.student_id.clone();
        self.store
            .logs
            .insert_unique(entry, |existing| {
                existing.session_id == session_id && existing.student_id == student_id
            })
            .await
    }

    pub async fn logs_by_session(&self, session_id: &str) -> Vec<AttendanceLogEntry> {
        self.store
            .logs
            .find_all(|l| l.session_id == session_id)
            .await
    }

    pub async fn logs_by_student(&self, student_id: &str) -> Vec<AttendanceLogEntry> {
        self.store
            .logs
            .find_all(|l| l.student_id == student_id)
            .await
    }
}
