use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn faculty_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/faculty", post(controller::register))
        .route("/api/faculty/{auth_id}", get(controller::get_by_auth_id))
}
