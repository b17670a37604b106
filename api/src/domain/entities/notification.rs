//! Notification job entity

use serde::{Deserialize, Serialize};

/// Token in a mail template replaced by the job body
pub const BODY_PLACEHOLDER: &str = "[%body%]";

/// An outbound mail waiting for the notification worker
///
/// Jobs are not persisted: anything still queued when the process stops is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub to: String,
    pub from: String,
    pub subject: String,
    /// Template file to wrap `body` in; `None` sends `body` as-is
    pub template: Option<String>,
    pub body: String,
}

impl NotificationJob {
    /// Final HTML body, given the raw template when one is set
    pub fn render(&self, template: Option<&str>) -> String {
        match template {
            Some(raw) => raw.replacen(BODY_PLACEHOLDER, &self.body, 1),
            None => self.body.clone(),
        }
    }
}

/// A fully rendered message handed to the mail transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}
