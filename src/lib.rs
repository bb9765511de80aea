pub mod config;
pub mod modules;
pub mod services;
pub mod store;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use modules::attendance::attendance_routes;
use modules::class::class_routes;
use modules::faculty::faculty_routes;
use modules::student::student_routes;
use services::mailer::Mailer;
use services::photos::PhotoStore;
use services::rate_limit::{create_rate_limiter, RateLimitLayer};
use services::security::security_headers;
use store::StoreHandle;

pub struct AppState {
    pub store: StoreHandle,
    pub mailer: Arc<Mailer>,
    pub photos: Arc<dyn PhotoStore>,
    /// Frontend origin embedded in QR payloads and verification links.
    pub base_url: String,
}

pub async fn create_app(
    store: StoreHandle,
    mailer: Arc<Mailer>,
    photos: Arc<dyn PhotoStore>,
    base_url: String,
) -> Router {
    let state = Arc::new(AppState {
        store,
        mailer,
        photos,
        base_url,
    });

    // A full class marks within seconds of the QR going up; the quota is
    // sized for that burst.
    let rate_limiter = create_rate_limiter(50, 200);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(faculty_routes())
        .merge(class_routes())
        .merge(student_routes())
        .merge(attendance_routes())
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 1024 * 2)) // photos travel base64-encoded
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "QR Attendance API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
