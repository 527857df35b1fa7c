/// Default notification display duration in milliseconds.
const DEFAULT_DURATION_MS: u64 = 4000;

/// Error notification display duration in milliseconds.
const ERROR_DURATION_MS: u64 = 6000;

/// Oldest notifications are dropped past this many.
const DEFAULT_CAPACITY: usize = 32;

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// A dismissible message for the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub title: String,
    pub message: Option<String>,
    pub duration_ms: u64,
}

/// Bounded notification queue with monotonic IDs.
///
/// Failures anywhere in the hub end up here instead of propagating.
/// Auto-dismissal timing is left to whoever renders the queue.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Queue that keeps at most `capacity` notifications (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            capacity: capacity.max(1),
        }
    }

    /// Push a notification and return its ID.
    pub fn push(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: Option<String>,
        duration_ms: u64,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.items.len() == self.capacity {
            self.items.remove(0);
        }
        self.items.push(Notification {
            id,
            level,
            title: title.into(),
            message,
            duration_ms,
        });
        id
    }

    pub fn success(&mut self, title: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, title, None, DEFAULT_DURATION_MS)
    }

    pub fn info(&mut self, title: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, title, None, DEFAULT_DURATION_MS)
    }

    /// Push a warning with body text.
    pub fn warning_with(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(
            NotificationLevel::Warning,
            title,
            Some(message.into()),
            DEFAULT_DURATION_MS,
        )
    }

    /// Push an error with body text. Errors stay up longer.
    pub fn error_with(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(
            NotificationLevel::Error,
            title,
            Some(message.into()),
            ERROR_DURATION_MS,
        )
    }

    /// Dismiss a notification. Returns `true` if it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let len_before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != len_before
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Remove and return everything, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any queued notification is an error.
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|n| n.level == NotificationLevel::Error)
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
