use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn class_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/classes", post(controller::create))
        .route(
            "/api/faculty/{auth_id}/classes",
            get(controller::list_by_faculty),
        )
}
