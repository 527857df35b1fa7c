//! Error types for preference storage.

/// Errors produced while reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preferences file is not a JSON object: {0}")]
    NotAnObject(String),
}
