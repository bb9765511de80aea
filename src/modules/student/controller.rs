use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use rand::RngCore;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::attendance::crud::AttendanceCrud;
use crate::modules::class::crud::ClassCrud;
use crate::modules::responses::ErrorResponse;
use crate::modules::student::{
    crud::{StudentCrud, StudentError},
    model::Student,
    schema::{
        DeleteStudentResponse, DeletedStudent, EnrollStudentRequest, EnrollStudentResponse,
        HistoryEntry, StudentResponse, VerifyStudentResponse,
    },
};
use crate::services::{client_ip, fingerprint, subnet};
use crate::AppState;

fn to_response(student: Student) -> StudentResponse {
    StudentResponse {
        id: student.id,
        name: student.name,
        roll_no: student.roll_no,
        class_id: student.class_id,
        email: student.email,
        parent_email: student.parent_email,
        is_verified: student.is_verified,
        created_at: student.created_at,
    }
}

fn fresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub async fn enroll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrollStudentRequest>,
) -> Result<(StatusCode, Json<EnrollStudentResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    if ClassCrud::new(state.store.clone()).get(&req.class_id).await.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message(
                "class_not_found",
                "Class not found",
            )),
        ));
    }

    let token = fresh_token();
    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        roll_no: req.roll_no,
        class_id: req.class_id,
        email: req.email,
        parent_email: req.parent_email,
        is_verified: false,
        verification_token: Some(token.clone()),
        verified_device_id: None,
        verified_ip_address: None,
        verified_subnet: None,
        created_at: Utc::now(),
    };

    let crud = StudentCrud::new(state.store.clone());
    if let Err(e) = crud.create(student.clone()).await {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::with_message("duplicate_email", e.to_string())),
        ));
    }

    // Verification email is a side effect; a send failure must not undo
    // the enrollment.
    let link = format!("{}/verify-student/{}", state.base_url, token);
    let body = state.mailer.verification_email(&student.name, &link);
    state.mailer.send_detached(
        student.email.clone(),
        "Verify Your Student Account".to_string(),
        body,
    );

    Ok((
        StatusCode::CREATED,
        Json(EnrollStudentResponse {
            message: "Student created. Verification email sent.",
            student: to_response(student),
        }),
    ))
}

/// Redeem a single-use verification token. The device fingerprint and
/// subnet observed on THIS request become the student's permanent binding,
/// so a request whose network cannot be classified is turned away with the
/// token left outstanding rather than verified with nothing bound.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VerifyStudentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let device_id = fingerprint::device_id(&client_ip::user_agent(&headers));
    let ip = client_ip::client_ip(&headers);
    let (Some(ip), Some(subnet)) = (ip.as_deref(), subnet::from_ip(ip.as_deref())) else {
        tracing::info!("verification rejected: no classifiable network on request");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_message(
                "network_unavailable",
                "Could not determine your network. Connect to your classroom network and open the link again.",
            )),
        ));
    };

    let crud = StudentCrud::new(state.store.clone());
    match crud.redeem_token(&token, &device_id, ip, &subnet).await {
        Ok(student) => {
            tracing::info!(student_id = %student.id, "student verified");
            Ok(Json(VerifyStudentResponse {
                message: "Student verified successfully",
            }))
        }
        Err(e @ StudentError::InvalidToken) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message("invalid_token", e.to_string())),
        )),
        Err(e @ StudentError::AlreadyVerified) => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::with_message("already_verified", e.to_string())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )),
    }
}

pub async fn list_by_class(
    State(state): State<Arc<AppState>>,
    Path(class_id): Path<String>,
) -> Json<Vec<StudentResponse>> {
    let students = StudentCrud::new(state.store.clone())
        .find_by_class(&class_id)
        .await;
    Json(students.into_iter().map(to_response).collect())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<DeleteStudentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = StudentCrud::new(state.store.clone());

    match crud.delete(&student_id).await {
        Some(student) => Ok(Json(DeleteStudentResponse {
            message: "Student and all associated attendance records deleted successfully",
            deleted_student: DeletedStudent {
                name: student.name,
                roll_no: student.roll_no,
                email: student.email,
            },
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message(
                "student_not_found",
                "Student not found",
            )),
        )),
    }
}

pub async fn attendance_history(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, (StatusCode, Json<ErrorResponse>)> {
    let student = StudentCrud::new(state.store.clone())
        .find_by_id(&student_id)
        .await
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message(
                "student_not_found",
                "Student not found",
            )),
        ))?;

    let attendance = AttendanceCrud::new(state.store.clone());
    let sessions = attendance.sessions_by_class(&student.class_id).await;
    let logs = attendance.logs_by_student(&student_id).await;

    let history = sessions
        .into_iter()
        .map(|session| {
            let log = logs.iter().find(|l| l.session_id == session.id);
            HistoryEntry {
                session_id: session.id,
                scheduled_at: session.scheduled_at,
                status: if log.is_some() { "present" } else { "absent" },
                marked_at: log.map(|l| l.timestamp),
            }
        })
        .collect();

    Ok(Json(history))
}
