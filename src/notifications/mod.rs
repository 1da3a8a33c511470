//! User-visible notifications.
//!
//! Every failed, classified API call produces exactly one error
//! notification and every successful mutation exactly one success
//! notification. Where they end up is decided by the [`Notifier`] the
//! [`ApiClient`](crate::api::ApiClient) was built with.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "[OK]",
            NotificationLevel::Error => "[!!]",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub timestamp: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Prints notifications to stderr for the terminal console
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only log notifications, print nothing
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            target: "tappedout::toast",
            level = %notification.level,
            message = %notification.message,
            "Notification"
        );
        if !self.quiet {
            eprintln!("{} {}", notification.level.icon(), notification.message);
        }
    }
}

/// Keeps every notification in memory, in order
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.entries.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.success("Sport created successfully.");
        notifier.error("Resource not found.");

        let entries = notifier.take();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, NotificationLevel::Success);
        assert_eq!(entries[1].message, "Resource not found.");
        assert!(notifier.entries().is_empty());
    }

    #[test]
    fn test_console_notifier_quiet() {
        assert!(ConsoleNotifier::quiet().quiet);
        assert!(!ConsoleNotifier::new().quiet);
        // Logged only, nothing printed
        ConsoleNotifier::quiet().error("Resource not found.");
    }

    #[test]
    fn test_icons() {
        assert_eq!(NotificationLevel::Success.icon(), "[OK]");
        assert_eq!(NotificationLevel::Error.icon(), "[!!]");
    }
}
