//! Document decoding errors.

/// Error decoding a document from its wire representation.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Malformed JSON, or a node without a usable `tag`.
    #[error("Invalid document: {0}")]
    Decode(#[from] serde_json::Error),
    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
