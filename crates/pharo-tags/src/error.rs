use thiserror::Error;

/// Errors raised while fetching or decoding the tag catalog.
///
/// None of these are fatal: loaders log them and fall back to an empty catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP request could not be completed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The document is not valid catalog JSON.
    #[error("malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Reading a local catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for pharo_core::PharoError {
    fn from(e: CatalogError) -> Self {
        pharo_core::PharoError::Catalog(e.to_string())
    }
}
