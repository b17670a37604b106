//! Notification worker
//!
//! The sole consumer of the notification queue. Each job is rendered and
//! handed to the mail transport exactly once; failures are logged and the job
//! is dropped.

use std::sync::Arc;

use crate::app::notification_queue::NotificationReceiver;
use crate::domain::entities::{MailMessage, NotificationJob};
use crate::domain::ports::{MailTransport, TemplateStore};
use crate::error::{DomainError, MailError};

/// Why a job was dropped
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Template error: {0}")]
    Template(#[from] DomainError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

pub struct NotificationWorker<MT, TS>
where
    MT: MailTransport,
    TS: TemplateStore,
{
    transport: Arc<MT>,
    templates: Arc<TS>,
}

impl<MT, TS> NotificationWorker<MT, TS>
where
    MT: MailTransport,
    TS: TemplateStore,
{
    pub fn new(transport: Arc<MT>, templates: Arc<TS>) -> Self {
        Self {
            transport,
            templates,
        }
    }

    /// Drain the queue until every producer is gone
    pub async fn run(self, mut receiver: NotificationReceiver) {
        tracing::info!("Notification worker started");
        while let Some(job) = receiver.recv().await {
            let to = job.to.clone();
            match self.process(&job).await {
                Ok(()) => tracing::info!(to = %to, subject = %job.subject, "Mail sent"),
                Err(e) => tracing::error!(to = %to, subject = %job.subject, error = %e, "Mail dropped"),
            }
        }
        tracing::info!("Notification worker stopped");
    }

    /// Render and deliver one job
    pub async fn process(&self, job: &NotificationJob) -> Result<(), DeliveryError> {
        let html_body = match &job.template {
            Some(name) => {
                let raw = self.templates.read_template(name).await?;
                job.render(Some(&raw))
            }
            None => job.render(None),
        };

        let message = MailMessage {
            from: job.from.clone(),
            to: job.to.clone(),
            subject: job.subject.clone(),
            html_body,
        };

        self.transport.send(&message).await?;
        Ok(())
    }
}
