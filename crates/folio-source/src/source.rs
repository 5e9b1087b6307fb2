//! Source trait and error types.

use folio_doc::Document;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// No document with this identifier.
    NotFound,
    /// The identifier cannot name a document (empty, absolute, `..`).
    InvalidIdentifier,
    /// The document exists but is not a valid document tree.
    Decode,
    /// Reading the document failed.
    Io,
}

/// Source error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct SourceError {
    kind: SourceErrorKind,
    identifier: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            identifier: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the identifier that was requested.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for `identifier`.
    #[must_use]
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_identifier(identifier)
    }

    /// Create an error from an I/O error, mapping missing files to `NotFound`.
    #[must_use]
    pub fn io(err: std::io::Error, identifier: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            _ => SourceErrorKind::Io,
        };
        Self::new(kind).with_identifier(identifier).with_source(err)
    }

    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (identifier: foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            SourceErrorKind::NotFound => "Document not found",
            SourceErrorKind::InvalidIdentifier => "Invalid identifier",
            SourceErrorKind::Decode => "Invalid document",
            SourceErrorKind::Io => "I/O error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(identifier) = &self.identifier {
            write!(f, " (identifier: {identifier})")?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Retrieval of documents by identifier.
///
/// Identifiers are `/`-separated names without extension, e.g. `"intro"` or
/// `"guides/setup"`.
pub trait DocumentSource: Send + Sync {
    /// Fetch and decode the document named `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the identifier is invalid, the document
    /// doesn't exist, can't be read, or can't be decoded.
    fn get_document(&self, identifier: &str) -> Result<Document, SourceError>;

    /// Check if a document exists.
    ///
    /// Returns `false` on errors.
    fn exists(&self, identifier: &str) -> bool;
}
