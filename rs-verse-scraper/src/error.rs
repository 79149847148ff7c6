//! Error types for the rs-verse-scraper binary.

/// Error type for corpus collection.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Returned when a request fails or answers with an error status.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Returned when a page lacks the element the extraction relies on.
    #[error("expected markup not found: {0}")]
    MissingMarkup(&'static str),

    /// Returned when the corpus cannot be written.
    #[error("failed to write corpus: {0}")]
    Io(#[from] std::io::Error),
}
