//! User-visible notifications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Pending notifications, oldest first, until the user dismisses them.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    pub fn dismiss_all(&mut self) {
        self.pending.clear();
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        self.pending.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_dismiss() {
        let mut queue = NotificationQueue::new();
        queue.notify(Notification::info("a", "first"));
        queue.notify(Notification::error("b", "second"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dismiss(5), None);
        assert_eq!(queue.dismiss(0).map(|n| n.message), Some("first".to_owned()));
        assert_eq!(queue.pending()[0].severity, Severity::Error);
        queue.dismiss_all();
        assert!(queue.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Notification::warning("Save", "disk full").to_string(), "Save: disk full");
    }
}
