//! Recoverable problems met while decoding a movie.
//!
//! A failsafe read does not stop at a malformed tag: the tag is dropped and
//! a [`Notification`] records where it happened. Callers inspect
//! [`SwfDocument::notifications`] afterwards.
//!
//! [`SwfDocument::notifications`]: crate::document::SwfDocument::notifications

use std::fmt;

/// How serious a recorded problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Decoding continued unchanged (over-long tag, padded frame count).
    Warning,
    /// The affected tag was dropped.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
    /// Offset of the tag header in the uncompressed file.
    pub offset: Option<u64>,
    pub tag_code: Option<u16>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notification_type)?;
        match (self.offset, self.tag_code) {
            (Some(offset), Some(code)) => write!(f, " at {offset} (tag {code})")?,
            (Some(offset), None) => write!(f, " at {offset}")?,
            (None, Some(code)) => write!(f, " (tag {code})")?,
            (None, None) => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// Problems gathered over one read, in the order they were met.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCollection(Vec<Notification>);

impl NotificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with no position, such as a frame count mismatch.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.0.push(Notification {
            notification_type,
            message: message.into(),
            offset: None,
            tag_code: None,
        });
    }

    /// Record a problem found in the tag starting at `offset`.
    pub fn notify_at(
        &mut self,
        notification_type: NotificationType,
        message: impl Into<String>,
        offset: u64,
        tag_code: Option<u16>,
    ) {
        self.0.push(Notification {
            notification_type,
            message: message.into(),
            offset: Some(offset),
            tag_code,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.0.iter()
    }

    pub fn of_type(&self, notification_type: NotificationType) -> Vec<&Notification> {
        self.iter()
            .filter(|n| n.notification_type == notification_type)
            .collect()
    }

    pub fn has_type(&self, notification_type: NotificationType) -> bool {
        self.iter().any(|n| n.notification_type == notification_type)
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
