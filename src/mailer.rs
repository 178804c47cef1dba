use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpSettings;
use crate::templates::RenderedEmail;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// One message ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, to_name: impl Into<String>, rendered: RenderedEmail) -> Self {
        Self {
            to: to.into(),
            to_name: to_name.into(),
            subject: rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
        }
    }
}

/// Message submission backend.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Check the backend accepts a session before a batch starts.
    async fn verify(&self) -> Result<bool, MailError> {
        Ok(true)
    }
}

/// Authenticated STARTTLS relay submission.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, MailError> {
        let from = format!("{} <{}>", settings.from_name, settings.from_email)
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidAddress(settings.from_email.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        log::debug!(
            "smtp relay configured: {}:{} as {}",
            settings.host,
            settings.port,
            settings.username
        );

        Ok(Self {
            transport: Arc::new(transport),
            from,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        self.transport.send(message).await?;
        Ok(())
    }

    /// Open a session and authenticate without sending anything.
    async fn verify(&self) -> Result<bool, MailError> {
        Ok(self.transport.test_connection().await?)
    }
}
