//! Outbound email via SMTP.
//!
//! Email is a best-effort side channel: a failed send is logged and
//! swallowed, it never fails the operation that triggered it. When
//! `SMTP_HOST` is unset the mailer is disabled and every send is a no-op,
//! which is also how the test suite runs.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "Attendance System <noreply@attendance.local>";

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl MailerConfig {
    /// Returns `None` when `SMTP_HOST` is unset, meaning email delivery is
    /// not configured for this deployment.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(password)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from_address: config.from_address,
        })
    }

    /// A mailer that silently drops every message. Used when SMTP is not
    /// configured and in tests.
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), MailError> {
        let Some(transport) = &self.transport else {
            tracing::debug!(to, subject, "mailer disabled, dropping email");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)?;

        transport.send(message).await?;
        tracing::info!(to, subject, "email sent");
        Ok(())
    }

    /// Fire-and-forget send: spawns the delivery and logs failures. The
    /// caller's operation is never gated on the outcome.
    pub fn send_detached(self: &Arc<Self>, to: String, subject: String, html_body: String) {
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, html_body).await {
                tracing::warn!(to, error = %e, "email send failed");
            }
        });
    }

    pub fn verification_email(&self, student_name: &str, verification_link: &str) -> String {
        format!(
            "<h2>Welcome to the Attendance System</h2>\
             <p>Dear {student_name},</p>\
             <p>Please click the link below to verify your account and join your class:</p>\
             <a href=\"{verification_link}\">Verify Account</a>\
             <p>This link works only once and binds the device and network you open it from.</p>\
             <p>If you did not request this, please ignore this email.</p>"
        )
    }

    pub fn attendance_email(
        &self,
        student_name: &str,
        roll_no: &str,
        date: &str,
        present: bool,
    ) -> String {
        let status = if present { "Present" } else { "Absent" };
        format!(
            "<h2>Attendance Update</h2>\
             <p>Dear Parent/Guardian,</p>\
             <p>This is to inform you about the attendance status of your ward:</p>\
             <ul>\
             <li><strong>Student Name:</strong> {student_name}</li>\
             <li><strong>Roll Number:</strong> {roll_no}</li>\
             <li><strong>Date:</strong> {date}</li>\
             <li><strong>Status:</strong> {status}</li>\
             </ul>\
             <p>Best regards,<br>Attendance Management System</p>"
        )
    }
}
