use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::attendance::{
    crud::AttendanceCrud,
    model::AttendanceSession,
    schema::{
        CreateSessionRequest, CreateSessionResponse, DeleteSessionResponse,
        MarkAttendanceRequest, MarkAttendanceResponse, NotifyResponse, RosterEntry,
        SessionDetailResponse, SessionSummary,
    },
};
use crate::modules::responses::ErrorResponse;
use crate::modules::student::crud::StudentCrud;
use crate::services::eligibility::{EligibilityEngine, MarkAttempt};
use crate::services::{client_ip, qr, subnet};
use crate::AppState;

/// Create an attendance session. The creator's network is captured now and
/// never updated; the QR payload is rendered before anything is persisted,
/// so a render failure leaves no session behind.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), (StatusCode, Json<ErrorResponse>)> {
    let ip = client_ip::client_ip(&headers);
    let session_subnet = subnet::from_ip(ip.as_deref());

    let session_id = Uuid::new_v4().to_string();
    let mark_url = format!("{}/mark-attendance/{}", state.base_url, session_id);
    let qr_code = qr::render_data_uri(&mark_url).map_err(|e| {
        tracing::error!(error = %e, "QR rendering failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_message(
                "qr_render_failed",
                "Could not render the session QR code",
            )),
        )
    })?;

    let session = AttendanceSession {
        id: session_id.clone(),
        class_id: req.class_id,
        scheduled_at: req.scheduled_at,
        qr_code: qr_code.clone(),
        ip_address: ip,
        subnet: session_subnet,
        created_at: Utc::now(),
    };
    AttendanceCrud::new(state.store.clone())
        .create_session(session)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            qr_code,
        }),
    ))
}

pub async fn session_detail(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionDetailResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = AttendanceCrud::new(state.store.clone());

    let session = crud.get_session(&session_id).await.ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::with_message(
            "session_not_found",
            "Attendance session not found",
        )),
    ))?;

    let students = StudentCrud::new(state.store.clone())
        .find_by_class(&session.class_id)
        .await;
    let logs = crud.logs_by_session(&session_id).await;
    let present_count = logs.len();
    let total_students = students.len();

    let roster = students
        .into_iter()
        .map(|student| {
            let log = logs.iter().find(|l| l.student_id == student.id);
            RosterEntry {
                id: student.id,
                name: student.name,
                roll_no: student.roll_no,
                has_marked_attendance: log.is_some(),
                photo_url: log.and_then(|l| l.photo_url.clone()),
                marked_at: log.map(|l| l.timestamp),
            }
        })
        .collect();

    Ok(Json(SessionDetailResponse {
        qr_code: session.qr_code,
        scheduled_at: session.scheduled_at,
        students: roster,
        total_students,
        present_count,
        absent_count: total_students - present_count,
    }))
}

pub async fn list_by_class(
    State(state): State<Arc<AppState>>,
    Path(class_id): Path<String>,
) -> Json<Vec<SessionSummary>> {
    let sessions = AttendanceCrud::new(state.store.clone())
        .sessions_by_class(&class_id)
        .await;
    Json(
        sessions
            .into_iter()
            .map(|s| SessionSummary {
                id: s.id,
                class_id: s.class_id,
                scheduled_at: s.scheduled_at,
                created_at: s.created_at,
            })
            .collect(),
    )
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteSessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match AttendanceCrud::new(state.store.clone())
        .delete_session(&session_id)
        .await
    {
        Some(session) => Ok(Json(DeleteSessionResponse {
            message: "Attendance session and all associated records deleted successfully",
            class_id: session.class_id,
            scheduled_at: session.scheduled_at,
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message(
                "session_not_found",
                "Attendance session not found",
            )),
        )),
    }
}

/// One marking attempt. The eligibility engine owns the guard chain; this
/// handler only parses the request and maps the outcome onto the wire.
pub async fn mark(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<Json<MarkAttendanceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let photo = match req.photo_data.as_deref() {
        Some(data) => Some(STANDARD.decode(data).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message(
                    "invalid_photo_data",
                    "Photo data is not valid base64",
                )),
            )
        })?),
        None => None,
    };

    let ip = client_ip::client_ip(&headers);
    let user_agent = client_ip::user_agent(&headers);

    let engine = EligibilityEngine::new(state.store.clone(), state.photos.clone());
    let entry = engine
        .mark(MarkAttempt {
            session_id: &session_id,
            student_id: &req.student_id,
            ip: ip.as_deref(),
            user_agent: &user_agent,
            photo,
        })
        .await
        .map_err(|reason| {
            (
                reason.status(),
                Json(ErrorResponse::with_message(reason.code(), reason.to_string())),
            )
        })?;

    Ok(Json(MarkAttendanceResponse {
        message: "Attendance marked successfully",
        photo_url: entry.photo_url,
        marked_at: entry.timestamp,
    }))
}

/// Email every parent in the class their ward's present/absent status for
/// this session. Individual send failures are logged and skipped; the
/// endpoint reports counts instead of failing.
pub async fn notify_parents(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<NotifyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = AttendanceCrud::new(state.store.clone());

    let session = crud.get_session(&session_id).await.ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::with_message(
            "session_not_found",
            "Attendance session not found",
        )),
    ))?;

    let students = StudentCrud::new(state.store.clone())
        .find_by_class(&session.class_id)
        .await;
    let logs = crud.logs_by_session(&session_id).await;
    let date = session.scheduled_at.format("%Y-%m-%d %H:%M").to_string();

    let mut sent = 0;
    let mut failed = 0;
    for student in &students {
        let present = logs.iter().any(|l| l.student_id == student.id);
        let subject = format!("Attendance Update for {} - {}", student.name, date);
        let body = state
            .mailer
            .attendance_email(&student.name, &student.roll_no, &date, present);

        match state.mailer.send(&student.parent_email, &subject, body).await {
            Ok(()) => sent += 1,
            Err(e) => {
                tracing::warn!(
                    student_id = %student.id,
                    error = %e,
                    "parent notification failed"
                );
                failed += 1;
            }
        }
    }

    Ok(Json(NotifyResponse {
        message: "Attendance notifications processed",
        sent,
        failed,
    }))
}
