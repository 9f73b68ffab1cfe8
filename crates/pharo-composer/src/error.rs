use std::fmt;

use pharo_drafts::{DraftError, DraftField};
use thiserror::Error;

/// Required structured fields that were left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Unmet fields, in topic, source, subject order.
    pub missing_fields: Vec<DraftField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.missing_fields.iter().map(|f| f.to_string()).collect();
        write!(f, "missing required fields: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Failures reported by the message transport.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The platform refused the post or command.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The platform could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The channel's composer does not accept posts.
    #[error("posting is disabled in this channel")]
    PostingDisabled,

    /// The transport rejected the submission; the draft is kept for retry.
    #[error("submission failed: {0}")]
    Submission(#[from] SinkError),

    #[error("draft store: {0}")]
    Drafts(#[from] DraftError),
}

impl From<ComposeError> for pharo_core::PharoError {
    fn from(e: ComposeError) -> Self {
        use pharo_core::PharoError;
        match e {
            ComposeError::Validation(v) => PharoError::Validation {
                fields: v
                    .missing_fields
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            ComposeError::PostingDisabled => PharoError::PostingDisabled,
            ComposeError::Submission(s) => PharoError::Submission(s.to_string()),
            ComposeError::Drafts(d) => d.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pharo_core::PharoError;

    #[test]
    fn posting_disabled_converts_without_dangling_channel() {
        let err: PharoError = ComposeError::PostingDisabled.into();
        assert_eq!(err.code(), "POSTING_DISABLED");
        assert_eq!(err.to_string(), "Posting is disabled in this channel");
    }

    #[test]
    fn validation_converts_with_field_list() {
        let err: PharoError = ComposeError::from(ValidationError {
            missing_fields: vec![DraftField::Topic, DraftField::Subject],
        })
        .into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Validation failed: missing topic, subject");
    }
}
