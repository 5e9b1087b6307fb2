//! Table of contents extraction.

use std::collections::HashMap;

use folio_doc::{Document, DocumentId, NodeId, NodeRef, NodeTag};

use crate::util::encode_component;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TocEntry {
    /// Heading text.
    pub title: String,
    /// Heading level as found in the document.
    pub level: u8,
    /// Anchor ID for linking.
    pub target_id: String,
}

impl TocEntry {
    /// Link to the heading anchor (`#` + target id).
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.target_id)
    }
}

/// Anchor ids of the heading nodes of one document instance.
///
/// Keys are node ids, which are only meaningful for the document that
/// produced them; lookups with a node from any other document return `None`.
/// The default value is empty and matches no document.
#[derive(Clone, Debug, Default)]
pub struct HeadingAnchors {
    document: Option<DocumentId>,
    ids: HashMap<NodeId, String>,
}

impl HeadingAnchors {
    /// Anchor id of `node`, if it is a heading of the extracted document.
    #[must_use]
    pub fn get(&self, node: NodeRef<'_>) -> Option<&str> {
        if self.document != Some(node.document().id()) {
            return None;
        }
        self.ids.get(&node.id()).map(String::as_str)
    }

    /// Document these anchors belong to.
    #[must_use]
    pub fn document(&self) -> Option<DocumentId> {
        self.document
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Output of [`extract_toc`].
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Headings in document pre-order.
    pub outline: Vec<TocEntry>,
    /// Heading node to anchor id association.
    pub anchors: HeadingAnchors,
}

/// Collect every heading of `doc` in one pre-order traversal.
///
/// Headings are numbered from 1 in traversal order; the anchor id is
/// `"{number}-{percent-encoded title}"`, so ids are unique within one run and
/// identical across runs over an unchanged tree.
#[must_use]
pub fn extract_toc(doc: &Document) -> Extraction {
    let mut outline = Vec::new();
    let mut ids = HashMap::new();

    for node in doc.descendants() {
        let NodeTag::Heading { level } = node.tag() else {
            continue;
        };

        let sequence = outline.len() + 1;
        let title = node.plain_text();
        let target_id = format!("{sequence}-{}", encode_component(&title));

        ids.insert(node.id(), target_id.clone());
        outline.push(TocEntry {
            title,
            level: *level,
            target_id,
        });
    }

    tracing::debug!(document = %doc.id(), headings = outline.len(), "Extracted table of contents");

    Extraction {
        outline,
        anchors: HeadingAnchors {
            document: Some(doc.id()),
            ids,
        },
    }
}
