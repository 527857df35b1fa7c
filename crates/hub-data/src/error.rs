//! Error types for backend data access.

/// Errors produced by gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Gateway(String),

    #[error("backend unavailable")]
    Unavailable,
}
