//! Error types for the scraper.
//!
//! Only hard failures surface here: a malformed document, a dead link,
//! an unreachable server, a broken database. Soft conditions the
//! extraction tolerates (continuation cells with no matching column,
//! unparseable dates, duplicate keys) are ordinary data, not errors.

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fetching, decoding, or persisting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An HTTP request failed or returned a bad status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The register page had no link with the expected label.
    #[error("No link labelled '{0}' on the register page")]
    LinkNotFound(String),

    /// The PDF library rejected the downloaded document.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The document parsed but its content could not be decoded into
    /// positioned text.
    #[error("Document decoding error: {0}")]
    Decode(String),

    /// A link's URL could not be parsed or resolved.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
