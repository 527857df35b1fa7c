//! Hub settings state: persisted preferences and the user notification queue.

pub mod error;
pub mod notifications;
pub mod preferences;

pub use error::PreferencesError;
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use preferences::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
