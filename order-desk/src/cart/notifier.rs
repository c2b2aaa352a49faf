//! Toast notifications
//!
//! The cart never renders anything itself. It hands a [`Notification`] to a
//! [`Notifier`]; the UI layer decides how to show it and wires the undo
//! button back to [`OptimisticListMutator::undo`](super::OptimisticListMutator::undo).

use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// Undo affordance attached to a removal toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoAction {
    pub line_id: String,
}

/// Transient message for the toast layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<UndoAction>,
    /// Auto-dismiss after this long
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Notification {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            action: None,
            duration,
        }
    }

    pub fn warning(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
            action: None,
            duration,
        }
    }

    pub fn with_undo(mut self, line_id: impl Into<String>) -> Self {
        self.action = Some(UndoAction {
            line_id: line_id.into(),
        });
        self
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(super::millis(*d))
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Fans notifications out to every subscribed toast renderer
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        // No subscribers is fine: nobody is looking at the screen
        if self.tx.send(notification).is_err() {
            tracing::trace!("Notification dropped, no subscribers");
        }
    }
}

/// Writes notifications to the log, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        let undo = n.action.as_ref().map(|a| a.line_id.as_str());
        match n.level {
            NotificationLevel::Info => {
                tracing::info!(undo = ?undo, duration_ms = millis(n.duration), "{}", n.message)
            }
            NotificationLevel::Warning => {
                tracing::warn!(undo = ?undo, duration_ms = millis(n.duration), "{}", n.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let notifier = BroadcastNotifier::default();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        let n = Notification::info("Removed Pho", Duration::from_secs(5)).with_undo("a");
        notifier.notify(n.clone());

        assert_eq!(rx1.recv().await.unwrap(), n);
        assert_eq!(rx2.recv().await.unwrap(), n);
    }

    #[test]
    fn test_broadcast_without_subscribers_does_not_panic() {
        let notifier = BroadcastNotifier::new(4);
        notifier.notify(Notification::warning("nobody listening", Duration::ZERO));
    }

    #[test]
    fn test_notification_serialization() {
        let n = Notification::info("Removed Pho", Duration::from_millis(5000)).with_undo("a");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["duration"], 5000);
        assert_eq!(json["action"]["line_id"], "a");

        let plain = serde_json::to_value(Notification::warning("w", Duration::ZERO)).unwrap();
        assert!(plain.get("action").is_none());
    }

    #[test]
    fn test_duration_saturates_instead_of_wrapping() {
        assert_eq!(millis(Duration::from_millis(5000)), 5000);
        assert_eq!(millis(Duration::MAX), u64::MAX);

        let n = Notification::info("forever", Duration::MAX);
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["duration"], u64::MAX);
    }
}
