//! Transient user feedback emitted by the stores
//!
//! Stores only describe what happened; rendering a notification is up to
//! whoever holds the receiving end of the channel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Structured notification payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub description: Option<String>,
    /// Stable identifier for automated UI checks
    pub test_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            description: None,
            test_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
}

/// Sending half of the notification channel
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver that renders its notifications
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Notification::new(NotificationKind::Success, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Notification::new(NotificationKind::Error, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Notification::new(NotificationKind::Info, message));
    }

    pub fn emit(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => warn!("Notification: {}", notification.message),
            _ => info!("Notification: {}", notification.message),
        }

        if self.tx.send(notification).is_err() {
            debug!("Notification receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Saved");
        notifier.emit(
            Notification::new(NotificationKind::Error, "Failed")
                .with_description("Try again")
                .with_test_id("save-error"),
        );

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::Success);
        assert_eq!(first.message, "Saved");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.kind, NotificationKind::Error);
        assert_eq!(second.description.as_deref(), Some("Try again"));
        assert_eq!(second.test_id.as_deref(), Some("save-error"));

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.info("Nobody is listening");
    }
}
