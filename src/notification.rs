//! Non-fatal read diagnostics.
//!
//! Skipped entity kinds and stale directory counts are recorded here, tagged
//! with the directory entry they concern. Anything that compromises the
//! structure of the file is an [`IgesError`](crate::IgesError) instead.

use std::fmt;

/// Kind of issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Valid IGES entity type that is not modeled; the entry was skipped.
    NotSupported,
    /// Inconsistent but recoverable data.
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationType::NotSupported => "NotSupported",
            NotificationType::Warning => "Warning",
        };
        f.write_str(name)
    }
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Kind of issue.
    pub notification_type: NotificationType,
    /// Sequence number of the directory entry concerned, when there is one.
    pub sequence: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Notification {
            notification_type,
            sequence: None,
            message: message.into(),
        }
    }

    /// A notification about the directory entry at `sequence`.
    pub fn at_entry(
        notification_type: NotificationType,
        sequence: usize,
        message: impl Into<String>,
    ) -> Self {
        Notification {
            sequence: Some(sequence),
            ..Self::new(notification_type, message)
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sequence {
            Some(sequence) => write!(f, "[{}] D{}: {}", self.notification_type, sequence, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Notifications gathered while reading one file, in encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(%notification, "notification");
        self.items.push(notification);
    }

    /// Record a notification that is not tied to an entry.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.push(Notification::new(notification_type, message));
    }

    /// Record a notification about the directory entry at `sequence`.
    pub fn notify_entry(
        &mut self,
        notification_type: NotificationType,
        sequence: usize,
        message: impl Into<String>,
    ) {
        self.push(Notification::at_entry(notification_type, sequence, message));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Notifications of one kind.
    pub fn of_type(&self, notification_type: NotificationType) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.notification_type == notification_type)
            .collect()
    }

    pub fn has_type(&self, notification_type: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == notification_type)
    }

    /// Notifications about the directory entry at `sequence`.
    pub fn for_entry(&self, sequence: usize) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.sequence == Some(sequence))
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
