//! Notification queue
//!
//! Unbounded in-process FIFO between the producers of notification jobs and
//! the single notification worker. Enqueueing never blocks.

use tokio::sync::mpsc;

use crate::domain::entities::NotificationJob;

/// Producer handle; cheap to clone, one per producer
#[derive(Clone)]
pub struct NotificationQueue {
    sender: mpsc::UnboundedSender<NotificationJob>,
}

/// Consumer end, owned by the notification worker
pub struct NotificationReceiver {
    receiver: mpsc::UnboundedReceiver<NotificationJob>,
}

/// Create a connected queue/receiver pair
pub fn notification_channel() -> (NotificationQueue, NotificationReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (NotificationQueue { sender }, NotificationReceiver { receiver })
}

impl NotificationQueue {
    /// Hand a job to the worker. Returns false if the worker is gone, in which
    /// case the job is dropped.
    pub fn enqueue(&self, job: NotificationJob) -> bool {
        let to = job.to.clone();
        match self.sender.send(job) {
            Ok(()) => {
                tracing::debug!(to = %to, "Queued notification");
                true
            }
            Err(_) => {
                tracing::error!(to = %to, "Notification worker is not running, dropping mail");
                false
            }
        }
    }
}

impl NotificationReceiver {
    /// Next job in submission order; `None` once every queue handle is dropped
    /// and the backlog is drained
    pub async fn recv(&mut self) -> Option<NotificationJob> {
        self.receiver.recv().await
    }

    /// Next job if one is already queued
    #[cfg(test)]
    pub fn try_recv(&mut self) -> Option<NotificationJob> {
        self.receiver.try_recv().ok()
    }
}
