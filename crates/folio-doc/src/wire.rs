//! JSON wire format.
//!
//! ```json
//! {
//!   "tag": { "kind": "heading", "level": 1 },
//!   "children": [ { "tag": { "kind": "inlineText", "text": "Intro" } } ]
//! }
//! ```
//!
//! A tag whose `kind` is unknown, or whose payload does not fit its `kind`,
//! decodes to [`NodeTag::Unsupported`] instead of failing the document.

use std::io::Read;

use serde::Deserialize;

use crate::document::{Arena, Document, NodeId};
use crate::error::DocumentError;
use crate::node::NodeTag;

#[derive(Deserialize)]
struct WireNode {
    tag: WireTag,
    #[serde(default)]
    children: Vec<WireNode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTag {
    Known(NodeTag),
    Unknown { kind: String },
}

impl From<WireTag> for NodeTag {
    fn from(tag: WireTag) -> Self {
        match tag {
            WireTag::Known(tag) => tag,
            WireTag::Unknown { kind } => {
                tracing::debug!(kind = %kind, "Decoded unsupported node kind");
                NodeTag::Unsupported { kind }
            }
        }
    }
}

impl Document {
    /// Decode a document from its JSON wire representation.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Decode` if the input is not valid JSON or a
    /// node lacks a `tag` object with a `kind`.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let root: WireNode = serde_json::from_str(json)?;
        Ok(Self::from_wire(root))
    }

    /// Decode a document from a reader producing the JSON wire representation.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Decode` for malformed input.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DocumentError> {
        let root: WireNode = serde_json::from_reader(reader)?;
        Ok(Self::from_wire(root))
    }

    fn from_wire(root: WireNode) -> Self {
        let mut arena = Arena::default();
        // Explicit stack keeps deep trees off the call stack; children are
        // pushed reversed so ids come out in pre-order.
        let mut stack: Vec<(Option<NodeId>, WireNode)> = vec![(None, root)];
        while let Some((parent, node)) = stack.pop() {
            let Some(id) = arena.push(parent, node.tag.into()) else {
                continue;
            };
            stack.extend(node.children.into_iter().rev().map(|c| (Some(id), c)));
        }
        arena.into_document()
    }
}
