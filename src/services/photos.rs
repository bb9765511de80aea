//! Attendance photo upload.
//!
//! Photos go to an external object store over HTTP. Upload is on the
//! critical path of marking: when a photo is supplied and the upload fails,
//! the attendance entry must not be written.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("photo store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("photo store returned status {0}")]
    Upstream(u16),

    #[error("photo store response missing url")]
    MissingUrl,
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Upload raw image bytes, returning the public URL of the stored photo.
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, PhotoError>;
}

/// Object store reached over HTTP: POSTs the image and expects a JSON body
/// carrying the stored photo's URL.
pub struct HttpPhotoStore {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    url: Option<String>,
    secure_url: Option<String>,
}

impl HttpPhotoStore {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl PhotoStore for HttpPhotoStore {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, PhotoError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Upstream(status.as_u16()));
        }

        let body: UploadResponse = response.json().await?;
        body.secure_url.or(body.url).ok_or(PhotoError::MissingUrl)
    }
}

/// In-memory store used in tests and when no photo endpoint is configured
/// in development. Can be flipped into a failing mode to exercise the
/// upload-failure path.
#[derive(Default)]
pub struct MemoryPhotoStore {
    uploads: AtomicUsize,
    fail: AtomicBool,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn upload(&self, _bytes: Vec<u8>) -> Result<String, PhotoError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PhotoError::Upstream(503));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("memory://attendance_photos/{n}"))
    }
}
