//! Mock document source for testing.

use std::collections::HashMap;

use folio_doc::Document;

use crate::source::{DocumentSource, SourceError, SourceErrorKind};

const BACKEND: &str = "Mock";

#[derive(Debug)]
enum Stored {
    Tree(Document),
    Json(String),
}

/// In-memory document source.
///
/// Each call to `get_document` returns a fresh copy, so every load gets its
/// own [`DocumentId`](folio_doc::DocumentId).
///
/// # Example
///
/// ```ignore
/// use folio_doc::Document;
/// use folio_source::{DocumentSource, MockSource};
///
/// let source = MockSource::new().with_document("intro", Document::build(|root| {
///     root.paragraph(|p| {
///         p.text("Hello");
///     });
/// }));
///
/// assert!(source.exists("intro"));
/// assert_eq!(source.get_document("intro").unwrap().root().plain_text(), "Hello");
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    documents: HashMap<String, Stored>,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a built document.
    #[must_use]
    pub fn with_document(mut self, identifier: impl Into<String>, doc: Document) -> Self {
        self.documents.insert(identifier.into(), Stored::Tree(doc));
        self
    }

    /// Add a document in wire format, decoded on every load.
    #[must_use]
    pub fn with_json(mut self, identifier: impl Into<String>, json: impl Into<String>) -> Self {
        self.documents
            .insert(identifier.into(), Stored::Json(json.into()));
        self
    }
}

impl DocumentSource for MockSource {
    fn get_document(&self, identifier: &str) -> Result<Document, SourceError> {
        match self.documents.get(identifier) {
            Some(Stored::Tree(doc)) => Ok(doc.clone()),
            Some(Stored::Json(json)) => Document::from_json(json).map_err(|e| {
                SourceError::new(SourceErrorKind::Decode)
                    .with_identifier(identifier)
                    .with_backend(BACKEND)
                    .with_source(e)
            }),
            None => Err(SourceError::not_found(identifier).with_backend(BACKEND)),
        }
    }

    fn exists(&self, identifier: &str) -> bool {
        self.documents.contains_key(identifier)
    }
}
