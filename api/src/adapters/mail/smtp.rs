//! SMTP mail transport
//!
//! Plain, unauthenticated SMTP via lettre, meant for a local relay or a
//! development catcher such as MailHog on port 1025.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::entities::MailMessage;
use crate::domain::ports::MailTransport;
use crate::error::MailError;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub send_timeout: Duration,
}

pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    connect_timeout: Duration,
    send_timeout: Duration,
}

impl SmtpMailTransport {
    pub fn new(config: &SmtpConfig) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .timeout(Some(config.connect_timeout))
            .build();

        Self {
            transport,
            connect_timeout: config.connect_timeout,
            send_timeout: config.send_timeout,
        }
    }

    /// Upper bound on one delivery
    ///
    /// lettre bounds the connect itself; the send keeps its whole budget on
    /// top of that, so a slow connect never shortens it.
    fn delivery_deadline(&self) -> Duration {
        self.connect_timeout + self.send_timeout
    }
}

/// Build the wire message for a rendered mail
pub fn build_message(message: &MailMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(
            message
                .from
                .parse()
                .map_err(|e| MailError::InvalidMessage(format!("Invalid from address: {}", e)))?,
        )
        .to(message
            .to
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("Invalid to address: {}", e)))?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|e| MailError::InvalidMessage(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(message)?;

        match tokio::time::timeout(self.delivery_deadline(), self.transport.send(email)).await {
            Ok(Ok(_)) => Ok(()),
            // The server answered, so the connection itself was fine
            Ok(Err(e)) if e.is_response() || e.is_permanent() || e.is_transient() => {
                Err(MailError::Send(e.to_string()))
            }
            Ok(Err(e)) => Err(MailError::Connect(e.to_string())),
            Err(_) => Err(MailError::Send(format!(
                "timed out after {}s",
                self.send_timeout.as_secs()
            ))),
        }
    }
}
