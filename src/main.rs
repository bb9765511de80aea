use std::sync::Arc;

use attendance_server::config::Config;
use attendance_server::services::mailer::{Mailer, MailerConfig};
use attendance_server::services::photos::{HttpPhotoStore, MemoryPhotoStore, PhotoStore};
use attendance_server::store::init_store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let store = init_store();

    let mailer = match MailerConfig::from_env() {
        Some(mail_config) => {
            let mailer = Mailer::new(mail_config).expect("Failed to build SMTP transport");
            tracing::info!("Email delivery enabled");
            mailer
        }
        None => {
            tracing::warn!("SMTP_HOST not set; email delivery disabled");
            Mailer::disabled()
        }
    };

    let photos: Arc<dyn PhotoStore> = match &config.photo_store_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "Photo uploads go to object store");
            Arc::new(HttpPhotoStore::new(reqwest::Client::new(), url.clone()))
        }
        None => {
            tracing::warn!("PHOTO_STORE_URL not set; photos held in memory");
            Arc::new(MemoryPhotoStore::new())
        }
    };

    let app =
        attendance_server::create_app(store, Arc::new(mailer), photos, config.base_url.clone())
            .await;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
