//! Client IP extraction from proxy headers.
//!
//! The service runs behind a reverse proxy in deployment, so the observed
//! peer address is the proxy's. The real client address is taken from
//! `X-Forwarded-For` (first hop) or `X-Real-IP`. The classifier treats an
//! unparseable or missing address as "no network observed"; no validation
//! happens here.

use axum::http::HeaderMap;

pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            let first = value.split(',').next()?.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
