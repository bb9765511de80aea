use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn attendance_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/attendance", post(controller::create_session))
        .route(
            "/api/attendance/{session_id}",
            get(controller::session_detail).delete(controller::delete_session),
        )
        .route("/api/attendance/{session_id}/mark", post(controller::mark))
        .route(
            "/api/attendance/{session_id}/notify",
            post(controller::notify_parents),
        )
        .route(
            "/api/classes/{class_id}/attendance",
            get(controller::list_by_class),
        )
}
