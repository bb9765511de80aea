use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::faculty::{
    crud::FacultyCrud,
    model::Faculty,
    schema::{FacultyResponse, RegisterFacultyRequest, RegisterFacultyResponse},
};
use crate::modules::responses::ErrorResponse;
use crate::AppState;

fn to_response(faculty: Faculty) -> FacultyResponse {
    FacultyResponse {
        id: faculty.id,
        auth_id: faculty.auth_id,
        name: faculty.name,
        email: faculty.email,
        created_at: faculty.created_at,
    }
}

/// Idempotent on the external auth id: re-registering an existing faculty
/// returns the existing record.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterFacultyRequest>,
) -> Result<(StatusCode, Json<RegisterFacultyResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = FacultyCrud::new(state.store.clone());

    if let Some(existing) = crud.find_by_auth_id(&req.auth_id).await {
        return Ok((
            StatusCode::OK,
            Json(RegisterFacultyResponse {
                message: "Faculty already exists",
                faculty: to_response(existing),
            }),
        ));
    }

    let faculty = Faculty {
        id: Uuid::new_v4().to_string(),
        auth_id: req.auth_id,
        name: req.name,
        email: req.email,
        created_at: Utc::now(),
    };
    crud.create(faculty.clone()).await;

    Ok((
        StatusCode::CREATED,
        Json(RegisterFacultyResponse {
            message: "Faculty created successfully",
            faculty: to_response(faculty),
        }),
    ))
}

pub async fn get_by_auth_id(
    State(state): State<Arc<AppState>>,
    Path(auth_id): Path<String>,
) -> Result<Json<FacultyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = FacultyCrud::new(state.store.clone());

    match crud.find_by_auth_id(&auth_id).await {
        Some(faculty) => Ok(Json(to_response(faculty))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_message(
                "faculty_not_found",
                "Faculty not found",
            )),
        )),
    }
}
