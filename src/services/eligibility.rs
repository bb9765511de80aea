//! Attendance-marking eligibility.
//!
//! One call per marking attempt. The guards run in a fixed order and the
//! first failure is the outcome; reasons are never aggregated. Rejections
//! are routine results surfaced to the client with a stable code, not
//! errors.
//!
//! The network guard compares the request's subnet against the subnet the
//! STUDENT was on when they verified, not against the session creator's
//! network. The student must be on the same network now as at verification
//! time, wherever the faculty device happens to be.

use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::attendance::crud::AttendanceCrud;
use crate::modules::attendance::model::AttendanceLogEntry;
use crate::modules::student::crud::StudentCrud;
use crate::services::photos::PhotoStore;
use crate::services::{fingerprint, subnet};
use crate::store::StoreHandle;

/// Why a marking attempt was turned down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("Attendance session not found")]
    SessionNotFound,

    #[error("Student not found")]
    StudentNotFound,

    #[error("Student account not verified")]
    NotVerified,

    #[error("Student is not enrolled in this class")]
    WrongClass,

    #[error("Attendance can only be marked from your verified device")]
    DeviceMismatch,

    #[error("Must be on the same network as when you verified your account")]
    NetworkMismatch,

    #[error("Attendance already marked")]
    AlreadyMarked,

    #[error("Photo upload failed, attendance was not recorded")]
    PhotoUploadFailed,
}

impl RejectReason {
    /// Stable machine-readable code for the client.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "session_not_found",
            Self::StudentNotFound => "student_not_found",
            Self::NotVerified => "not_verified",
            Self::WrongClass => "wrong_class",
            Self::DeviceMismatch => "device_mismatch",
            Self::NetworkMismatch => "network_mismatch",
            Self::AlreadyMarked => "already_marked",
            Self::PhotoUploadFailed => "photo_upload_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound | Self::StudentNotFound => StatusCode::NOT_FOUND,
            Self::NotVerified
            | Self::WrongClass
            | Self::DeviceMismatch
            | Self::NetworkMismatch => StatusCode::FORBIDDEN,
            Self::AlreadyMarked => StatusCode::CONFLICT,
            Self::PhotoUploadFailed => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Everything the engine needs to know about one marking attempt.
pub struct MarkAttempt<'a> {
    pub session_id: &'a str,
    pub student_id: &'a str,
    pub ip: Option<&'a str>,
    pub user_agent: &'a str,
    pub photo: Option<Vec<u8>>,
}

pub struct EligibilityEngine {
    store: StoreHandle,
    photos: Arc<dyn PhotoStore>,
}

impl EligibilityEngine {
    pub fn new(store: StoreHandle, photos: Arc<dyn PhotoStore>) -> Self {
        Self { store, photos }
    }

    pub async fn mark(&self, attempt: MarkAttempt<'_>) -> Result<AttendanceLogEntry, RejectReason> {
        let sessions = AttendanceCrud::new(self.store.clone());
        let students = StudentCrud::new(self.store.clone());

        let session = sessions
            .get_session(attempt.session_id)
            .await
            .ok_or(RejectReason::SessionNotFound)?;

        let student = students
            .find_by_id(attempt.student_id)
            .await
            .ok_or(RejectReason::StudentNotFound)?;

        if !student.is_verified {
            return Err(RejectReason::NotVerified);
        }

        if student.class_id != session.class_id {
            return Err(RejectReason::WrongClass);
        }

        let current_device = fingerprint::device_id(attempt.user_agent);
        if student.verified_device_id.as_deref() != Some(current_device.as_str()) {
            tracing::info!(
                student_id = attempt.student_id,
                current = %current_device,
                "marking rejected: device mismatch"
            );
            return Err(RejectReason::DeviceMismatch);
        }

        let bound_subnet = student
            .verified_subnet
            .as_deref()
            .ok_or(RejectReason::NetworkMismatch)?;
        if !subnet::same_subnet(attempt.ip, bound_subnet) {
            tracing::info!(
                student_id = attempt.student_id,
                ip = attempt.ip,
                bound_subnet,
                "marking rejected: network mismatch"
            );
            return Err(RejectReason::NetworkMismatch);
        }

        // Early idempotence check so a repeat attempt is turned down before
        // any photo upload happens. The authoritative check is the unique
        // insert below.
        if sessions
            .log_exists(attempt.session_id, attempt.student_id)
            .await
        {
            return Err(RejectReason::AlreadyMarked);
        }

        // Photo upload, when present, must succeed before anything is
        // recorded.
        let photo_url = match attempt.photo {
            Some(bytes) => {
                let url = self.photos.upload(bytes).await.map_err(|e| {
                    tracing::warn!(error = %e, "photo upload failed");
                    RejectReason::PhotoUploadFailed
                })?;
                Some(url)
            }
            None => None,
        };

        let entry = AttendanceLogEntry {
            id: Uuid::new_v4().to_string(),
            session_id: attempt.session_id.to_string(),
            student_id: attempt.student_id.to_string(),
            device_id: current_device,
            ip_address: attempt.ip.map(str::to_string),
            timestamp: Utc::now(),
            photo_url,
        };

        // A racer that also passed the early check loses here.
        sessions
            .append_log(entry.clone())
            .await
            .map_err(|_| RejectReason::AlreadyMarked)?;

        tracing::info!(
            session_id = attempt.session_id,
            student_id = attempt.student_id,
            "attendance marked"
        );
        Ok(entry)
    }
}
