//! Filesystem document source.

use std::fs;
use std::path::{Component, Path, PathBuf};

use folio_doc::Document;

use crate::source::{DocumentSource, SourceError, SourceErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Extension of stored documents.
const EXTENSION: &str = "json";

/// Reads documents from `<root>/<identifier>.json`.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an identifier to its file, rejecting identifiers that would escape
    /// the root.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(identifier);
        let valid = !identifier.trim().is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !valid {
            return Err(SourceError::new(SourceErrorKind::InvalidIdentifier)
                .with_identifier(identifier)
                .with_backend(BACKEND));
        }

        Ok(self.root.join(format!("{identifier}.{EXTENSION}")))
    }
}

impl DocumentSource for FsSource {
    fn get_document(&self, identifier: &str) -> Result<Document, SourceError> {
        let path = self.resolve(identifier)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| SourceError::io(e, identifier).with_backend(BACKEND))?;

        let doc = Document::from_json(&content).map_err(|e| {
            SourceError::new(SourceErrorKind::Decode)
                .with_identifier(identifier)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        tracing::debug!(identifier, path = %path.display(), nodes = doc.len(), "Loaded document");
        Ok(doc)
    }

    fn exists(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok_and(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use folio_doc::NodeTag;
    use pretty_assertions::assert_eq;

    use super::*;

    const DOC: &str = r#"{"tag": {"kind": "root"}, "children": [
        {"tag": {"kind": "heading", "level": 1}, "children": [
            {"tag": {"kind": "inlineText", "text": "Setup"}}
        ]}
    ]}"#;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_fs_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FsSource>();
    }

    #[test]
    fn test_get_document() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("intro.json"), DOC).unwrap();

        let source = FsSource::new(temp_dir.path());
        let doc = source.get_document("intro").unwrap();

        let heading = doc.root().children().next().unwrap();
        assert_eq!(heading.tag(), &NodeTag::Heading { level: 1 });
        assert_eq!(heading.plain_text(), "Setup");
    }

    #[test]
    fn test_get_nested_document() {
        let temp_dir = create_test_dir();
        fs::create_dir_all(temp_dir.path().join("guides")).unwrap();
        fs::write(temp_dir.path().join("guides/setup.json"), DOC).unwrap();

        let source = FsSource::new(temp_dir.path());
        assert!(source.get_document("guides/setup").is_ok());
        assert!(source.exists("guides/setup"));
    }

    #[test]
    fn test_missing_document() {
        let temp_dir = create_test_dir();
        let source = FsSource::new(temp_dir.path());

        let err = source.get_document("nope").unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
        assert_eq!(err.identifier(), Some("nope"));
        assert!(!source.exists("nope"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        let source = FsSource::new(temp_dir.path().join("docs"));
        fs::write(temp_dir.path().join("secret.json"), DOC).unwrap();

        for identifier in ["../secret", "guides/../../secret", "/etc/passwd", "", "  ", "./intro"] {
            let err = source.get_document(identifier).unwrap_err();
            assert_eq!(err.kind(), SourceErrorKind::InvalidIdentifier, "{identifier:?}");
            assert!(!source.exists(identifier));
        }
    }

    #[test]
    fn test_decode_error() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("broken.json"), "{not json").unwrap();

        let source = FsSource::new(temp_dir.path());
        let err = source.get_document("broken").unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Decode);
        assert!(err.to_string().starts_with("[Fs] Invalid document: "));
    }
}
