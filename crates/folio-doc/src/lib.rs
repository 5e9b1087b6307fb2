//! Tagged document tree model.
//!
//! A [`Document`] is a rooted, ordered, acyclic tree of tagged nodes stored in
//! an arena. Every node gets a stable [`NodeId`] at construction, and every
//! document gets a process-unique [`DocumentId`], so associations keyed by node
//! identity can be scoped to the tree instance that produced them.
//!
//! Documents are read-only once built. They come either from the
//! [`Document::build`] closure API or from the JSON wire format
//! ([`Document::from_json`]).
//!
//! # Example
//!
//! ```
//! use folio_doc::Document;
//!
//! let doc = Document::build(|root| {
//!     root.heading(1, |h| {
//!         h.text("Intro");
//!     });
//!     root.paragraph(|p| {
//!         p.text("Hello, ");
//!         p.text("world");
//!     });
//! });
//!
//! assert_eq!(doc.root().plain_text(), "IntroHello, world");
//! ```

mod builder;
mod document;
mod error;
mod node;
mod wire;

pub use builder::NodeBuilder;
pub use document::{Descendants, Document, DocumentId, NodeId, NodeRef, plain_text};
pub use error::DocumentError;
pub use node::{InlineStyle, NodeTag, ResourceLink};
