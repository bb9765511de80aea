use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::class::{
    crud::ClassCrud,
    model::Class,
    schema::{ClassResponse, CreateClassRequest},
};
use crate::modules::responses::ErrorResponse;
use crate::AppState;

fn to_response(class: Class) -> ClassResponse {
    ClassResponse {
        id: class.id,
        name: class.name,
        faculty_id: class.faculty_id,
        created_at: class.created_at,
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let class = Class {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        faculty_id: req.faculty_id,
        created_at: Utc::now(),
    };
    ClassCrud::new(state.store.clone()).create(class.clone()).await;

    Ok((StatusCode::CREATED, Json(to_response(class))))
}

pub async fn list_by_faculty(
    State(state): State<Arc<AppState>>,
    Path(faculty_id): Path<String>,
) -> Json<Vec<ClassResponse>> {
    let classes = ClassCrud::new(state.store.clone())
        .find_by_faculty(&faculty_id)
        .await;
    Json(classes.into_iter().map(to_response).collect())
}
