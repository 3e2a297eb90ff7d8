//! Best-effort reviewer notification sent after a resume has been enriched.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::models::candidate::CandidateRow;
use crate::models::entities::{EntityType, GroupedEntities};

pub const SUBJECT: &str = "New Resume Processed";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid mailbox '{0}'")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Summary of one processed resume for the HR reviewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewNotification {
    pub candidate_name: String,
    pub candidate_email: String,
    pub resume_key: String,
    pub skills: Vec<String>,
    /// ORGANIZATION entities, read as education / employer history.
    pub organizations: Vec<String>,
}

impl ReviewNotification {
    pub fn new(
        candidate: &CandidateRow,
        resume_key: &str,
        skills: &[String],
        entities: &GroupedEntities,
    ) -> Self {
        let email = candidate.email.trim();
        Self {
            candidate_name: candidate.full_name(),
            candidate_email: if email.is_empty() { "N/A" } else { email }.to_string(),
            resume_key: resume_key.to_string(),
            skills: skills.to_vec(),
            organizations: entities.get(EntityType::Organization).to_vec(),
        }
    }

    pub fn body(&self) -> String {
        format!(
            "{SUBJECT}\n\
             Candidate: {}\n\
             Email: {}\n\
             Resume Key: {}\n\n\
             Extracted Skills:\n{}\n\n\
             Educational Details:\n{}",
            self.candidate_name,
            self.candidate_email,
            self.resume_key,
            bullets(&self.skills, "None Found"),
            bullets(&self.organizations, "Not Found"),
        )
    }
}

fn bullets(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {empty}");
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &ReviewNotification) -> Result<(), NotifyError>;
}

/// Sends the notification as plain-text mail to the configured reviewer.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port);
        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: parse_mailbox(&config.from)?,
            to: parse_mailbox(&config.reviewer)?,
        })
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, NotifyError> {
    raw.parse()
        .map_err(|_| NotifyError::Address(raw.to_string()))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: &ReviewNotification) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body())?;

        self.transport.send(message).await?;
        Ok(())
    }
}
