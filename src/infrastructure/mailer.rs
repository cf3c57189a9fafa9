use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    config::{ConfigError, SmtpConfig},
    domain::EmailMessage,
};

/// Outbound mail capability.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Authenticated SMTP relay reached over STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, ConfigError> {
        let (sender, password) = config.require_credentials()?;
        let sender_mailbox: Mailbox = sender.parse().map_err(|_| ConfigError::Invalid {
            key: "EMAIL_ADDRESS",
            value: sender.to_string(),
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|source| ConfigError::Relay {
                server: config.server.clone(),
                source,
            })?
            .port(config.port)
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport,
            sender: sender_mailbox,
        })
    }
}

pub fn build_message(sender: &Mailbox, message: &EmailMessage) -> Result<Message> {
    let recipient: Mailbox = message
        .recipient
        .parse()
        .with_context(|| format!("invalid recipient address {:?}", message.recipient))?;

    Message::builder()
        .from(sender.clone())
        .to(recipient)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .context("failed to build email")
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let email = build_message(&self.sender, message)?;
        self.transport
            .send(email)
            .await
            .with_context(|| format!("SMTP delivery to {} failed", message.recipient))?;
        Ok(())
    }
}
