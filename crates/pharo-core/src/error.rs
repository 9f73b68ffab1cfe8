use thiserror::Error;

#[derive(Debug, Error)]
pub enum PharoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag catalog error: {0}")]
    Catalog(String),

    #[error("Draft store error: {0}")]
    Drafts(String),

    #[error("Validation failed: missing {fields}")]
    Validation { fields: String },

    #[error("Posting is disabled in this channel")]
    PostingDisabled,

    #[error("Submission rejected: {0}")]
    Submission(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PharoError {
    /// Short error code string, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            PharoError::Config(_) => "CONFIG_ERROR",
            PharoError::Catalog(_) => "CATALOG_ERROR",
            PharoError::Drafts(_) => "DRAFTS_ERROR",
            PharoError::Validation { .. } => "VALIDATION_ERROR",
            PharoError::PostingDisabled => "POSTING_DISABLED",
            PharoError::Submission(_) => "SUBMISSION_ERROR",
            PharoError::Serialization(_) => "SERIALIZATION_ERROR",
            PharoError::Io(_) => "IO_ERROR",
            PharoError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Every error in this taxonomy leaves the user able to retry.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PharoError::Config(_) | PharoError::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, PharoError>;
