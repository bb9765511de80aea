pub mod client_ip;
pub mod eligibility;
pub mod fingerprint;
pub mod mailer;
pub mod photos;
pub mod qr;
pub mod rate_limit;
pub mod security;
pub mod subnet;
