use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn student_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/students", post(controller::enroll))
        .route("/api/students/verify/{token}", post(controller::verify))
        .route("/api/students/{student_id}", delete(controller::delete))
        .route(
            "/api/students/{student_id}/history",
            get(controller::attendance_history),
        )
        .route(
            "/api/classes/{class_id}/students",
            get(controller::list_by_class),
        )
}
