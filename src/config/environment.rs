use std::env;

/// Environment configuration.
///
/// Everything has a development default; the service boots with no env at
/// all, with email disabled and photos kept in memory.
pub struct Config {
    /// Public frontend origin; embedded in QR payloads and verification
    /// email links.
    pub base_url: String,
    pub bind_addr: String,
    /// Object-store endpoint for attendance photos. Unset means photos are
    /// held in memory (development only).
    pub photo_store_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            base_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            photo_store_url: env::var("PHOTO_STORE_URL").ok(),
        }
    }
}
