//! Email background job.
//!
//! Jobs are pushed by the queue notifier and drained by `jobs work`. With
//! `SMTP_HOST` set the worker relays through lettre; otherwise it logs the
//! message and marks the job done.

use apalis::prelude::Data;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, SmtpSettings};
use crate::errors::{AppError, AppResult};

/// Email job payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Sender override, defaults to `MAIL_FROM`
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    fn sender<'a>(&'a self, default_from: &'a str) -> &'a str {
        self.from.as_deref().unwrap_or(default_from)
    }

    fn to_message(&self, default_from: &str) -> AppResult<Message> {
        let from = self
            .sender(default_from)
            .parse()
            .map_err(|e| AppError::bad_request(format!("Invalid sender address: {}", e)))?;
        let to = self
            .to
            .parse()
            .map_err(|e| AppError::bad_request(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&self.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())
            .map_err(|e| AppError::internal(format!("Failed to build email: {}", e)))
    }
}

/// Sender and relay settings shared by every job on a worker
#[derive(Clone)]
pub struct MailSettings {
    pub from: String,
    pub smtp: Option<SmtpSettings>,
}

impl From<&Config> for MailSettings {
    fn from(config: &Config) -> Self {
        Self {
            from: config.mail_from.clone(),
            smtp: config.smtp.clone(),
        }
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob, mail: Data<MailSettings>) -> Result<(), AppError> {
    deliver(&job, &mail.from, mail.smtp.as_ref()).await
}

async fn deliver(job: &EmailJob, default_from: &str, smtp: Option<&SmtpSettings>) -> AppResult<()> {
    let from = job.sender(default_from);
    tracing::info!(to = %job.to, from = %from, subject = %job.subject, "Processing email job");

    let Some(smtp) = smtp else {
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\nFrom: {}\nTo: {}\nSubject: {}\n\n{}",
            from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    };

    let message = job.to_message(default_from)?;
    let mailer = build_transport(smtp)?;

    mailer.send(message).await.map_err(|e| {
        tracing::error!(to = %job.to, error = %e, "SMTP delivery failed");
        AppError::internal(format!("SMTP delivery failed: {}", e))
    })?;

    tracing::info!(to = %job.to, "Email sent");
    Ok(())
}

fn build_transport(smtp: &SmtpSettings) -> AppResult<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
        .map_err(|e| AppError::internal(format!("Invalid SMTP relay: {}", e)))?
        .port(smtp.port);

    let builder = match (&smtp.username, smtp.password()) {
        (Some(user), Some(pass)) => {
            builder.credentials(Credentials::new(user.clone(), pass.to_string()))
        }
        _ => builder,
    };

    Ok(builder.build())
}
