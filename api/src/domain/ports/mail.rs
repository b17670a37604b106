//! Outbound mail port traits
//!
//! The notification worker depends on these two collaborators only.

use async_trait::async_trait;

use crate::domain::entities::MailMessage;
use crate::error::{DomainError, MailError};

/// Delivers a rendered message, one attempt per call
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Source of raw mail templates
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Raw template body; `DomainError::NotFound` when no such template exists
    async fn read_template(&self, name: &str) -> Result<String, DomainError>;
}
