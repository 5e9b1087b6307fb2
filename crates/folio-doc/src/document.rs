//! Arena-backed document tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::NodeTag;

/// Index of a node within its [`Document`].
///
/// Ids are assigned in creation order and are only meaningful together with
/// the document that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Process-unique identity of one document instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) tag: NodeTag,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Node storage shared by the builder and the wire decoder.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    /// Allocate a node and link it under `parent`.
    ///
    /// Returns `None` without allocating when `parent` is a leaf.
    pub(crate) fn push(&mut self, parent: Option<NodeId>, tag: NodeTag) -> Option<NodeId> {
        if let Some(parent) = parent {
            let parent_tag = &self.nodes[parent.0].tag;
            if parent_tag.is_leaf() {
                tracing::warn!(
                    parent = parent_tag.kind(),
                    child = tag.kind(),
                    "Dropping child of leaf node"
                );
                return None;
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        Some(id)
    }

    pub(crate) fn tag(&self, id: NodeId) -> &NodeTag {
        &self.nodes[id.0].tag
    }

    pub(crate) fn into_document(self) -> Document {
        debug_assert!(!self.nodes.is_empty(), "document arena must contain a root");
        Document {
            id: DocumentId::next(),
            nodes: self.nodes,
            root: NodeId(0),
        }
    }
}

/// A rooted, ordered document tree.
///
/// Cloning a document produces a new instance with a fresh [`DocumentId`]:
/// node ids carry over, identity-scoped associations do not.
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            id: DocumentId::next(),
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeData {
                    tag: n.tag.clone(),
                    parent: n.parent,
                    children: n.children.clone(),
                })
                .collect(),
            root: self.root,
        }
    }
}

impl Document {
    /// Identity of this document instance.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: self.root,
        }
    }

    /// Look up a node by id. Returns `None` for ids outside this document's arena.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal starting at the root.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        self.root().descendants()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Borrowed view of one node in a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    #[must_use]
    pub fn tag(&self) -> &'a NodeTag {
        &self.doc.data(self.id).tag
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let doc = self.doc;
        doc.data(self.id).parent.map(|id| NodeRef { doc, id })
    }

    /// Children in reading order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// Pre-order traversal of this node and everything below it.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            doc: self.doc,
            stack: vec![self.id],
        }
    }

    /// Text content of this node with all markup discarded.
    ///
    /// Inline text, code, and equation leaves contribute their literal payload;
    /// every other node concatenates its children in order.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self.tag() {
            NodeTag::InlineText { text } => out.push_str(text),
            NodeTag::InlineCode { code } => out.push_str(code),
            NodeTag::InlineEquation { expr } => out.push_str(expr),
            _ => {
                for child in self.children() {
                    child.write_plain_text(out);
                }
            }
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("document", &self.doc.id)
            .field("id", &self.id)
            .field("tag", self.tag())
            .finish()
    }
}

/// Free-function form of [`NodeRef::plain_text`].
#[must_use]
pub fn plain_text(node: NodeRef<'_>) -> String {
    node.plain_text()
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.data(id).children.iter().rev().copied());
        Some(NodeRef { doc: self.doc, id })
    }
}
