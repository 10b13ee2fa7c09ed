//! Toast notifications emitted by the store.

use tokio::sync::broadcast;

/// Buffered notifications per subscriber before the oldest are dropped.
pub const NOTIFICATION_BUFFER: usize = 16;

/// A message for the UI to show to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
}

impl Notification {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) => message,
        }
    }
}

/// Fan-out of notifications to every subscribed UI surface.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self { tx }
    }
}

impl Notifier {
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let notification = Notification::Success(message.into());
        tracing::info!(message = notification.message(), "notification");
        // No subscribers is fine; nothing is showing toasts.
        let _ = self.tx.send(notification);
    }
}
