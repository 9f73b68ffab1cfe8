use thiserror::Error;

/// Errors that can occur while persisting drafts.
#[derive(Debug, Error)]
pub enum DraftError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored draft could not be encoded or decoded.
    #[error("draft encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Another thread panicked while holding the connection.
    #[error("draft store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, DraftError>;

impl From<DraftError> for pharo_core::PharoError {
    fn from(e: DraftError) -> Self {
        pharo_core::PharoError::Drafts(e.to_string())
    }
}
