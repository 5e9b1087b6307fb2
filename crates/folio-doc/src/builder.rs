//! Closure-based document construction.

use crate::document::{Arena, Document, NodeId};
use crate::node::{InlineStyle, NodeTag, ResourceLink};

impl Document {
    /// Build a document under a [`NodeTag::Root`] node.
    ///
    /// Node ids are assigned in the order nodes are created, which for
    /// this API is document pre-order.
    pub fn build<F>(f: F) -> Document
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        Self::build_with_root(NodeTag::Root, f)
    }

    /// Build a document whose root carries the given tag.
    pub fn build_with_root<F>(tag: NodeTag, f: F) -> Document
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        let mut arena = Arena::default();
        if let Some(root) = arena.push(None, tag) {
            f(&mut NodeBuilder {
                arena: &mut arena,
                id: root,
            });
        }
        arena.into_document()
    }
}

/// Appends children to one node of a document under construction.
///
/// Children added to a leaf node are dropped with a warning.
pub struct NodeBuilder<'a> {
    arena: &'a mut Arena,
    id: NodeId,
}

impl NodeBuilder<'_> {
    /// Id of the node this builder appends to.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag of the node this builder appends to.
    #[must_use]
    pub fn tag(&self) -> &NodeTag {
        self.arena.tag(self.id)
    }

    /// Append a child with `tag` and populate it with `f`.
    pub fn node<F>(&mut self, tag: NodeTag, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        if let Some(child) = self.arena.push(Some(self.id), tag) {
            f(&mut NodeBuilder {
                arena: &mut *self.arena,
                id: child,
            });
        }
        self
    }

    /// Append a child with no children of its own.
    pub fn leaf(&mut self, tag: NodeTag) -> &mut Self {
        self.node(tag, |_| {})
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.leaf(NodeTag::InlineText { text: text.into() })
    }

    pub fn inline_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.leaf(NodeTag::InlineCode { code: code.into() })
    }

    pub fn inline_equation(&mut self, expr: impl Into<String>) -> &mut Self {
        self.leaf(NodeTag::InlineEquation { expr: expr.into() })
    }

    /// Append an inline run carrying `style`.
    pub fn styled<F>(&mut self, style: InlineStyle, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(
            NodeTag::Inline {
                style: Some(style),
                link: None,
            },
            f,
        )
    }

    /// Append an unstyled inline run linking to `url`.
    pub fn link<F>(&mut self, url: impl Into<String>, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(
            NodeTag::Inline {
                style: None,
                link: Some(url.into()),
            },
            f,
        )
    }

    pub fn paragraph<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::Paragraph, f)
    }

    pub fn heading<F>(&mut self, level: u8, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::Heading { level }, f)
    }

    pub fn callout<F>(&mut self, emoji: Option<&str>, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(
            NodeTag::Callout {
                emoji: emoji.map(ToOwned::to_owned),
            },
            f,
        )
    }

    pub fn quote<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::Quote, f)
    }

    pub fn list<F>(&mut self, ordered: bool, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::List { ordered }, f)
    }

    pub fn item<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::ListItem, f)
    }

    pub fn code(
        &mut self,
        language: impl Into<String>,
        code: impl Into<String>,
        caption: Option<&str>,
    ) -> &mut Self {
        self.leaf(NodeTag::Code {
            language: language.into(),
            caption: caption.map(ToOwned::to_owned),
            code: code.into(),
        })
    }

    pub fn equation(&mut self, expr: impl Into<String>, caption: Option<&str>) -> &mut Self {
        self.leaf(NodeTag::Equation {
            expr: expr.into(),
            caption: caption.map(ToOwned::to_owned),
        })
    }

    pub fn image(&mut self, link: ResourceLink, caption: Option<&str>) -> &mut Self {
        self.leaf(NodeTag::Image {
            link,
            caption: caption.map(ToOwned::to_owned),
        })
    }

    pub fn table<F>(&mut self, caption: Option<&str>, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(
            NodeTag::Table {
                caption: caption.map(ToOwned::to_owned),
            },
            f,
        )
    }

    pub fn row<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::TableRow, f)
    }

    pub fn cell<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut NodeBuilder<'_>),
    {
        self.node(NodeTag::TableCell, f)
    }

    pub fn divider(&mut self) -> &mut Self {
        self.leaf(NodeTag::Divider)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_follow_creation_order() {
        let doc = Document::build(|root| {
            root.heading(1, |h| {
                h.text("A");
            });
            root.paragraph(|p| {
                p.text("B");
            });
        });

        let ids: Vec<usize> = doc.descendants().map(|n| n.id().index()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_children_of_leaf_are_dropped() {
        let doc = Document::build(|root| {
            root.node(NodeTag::InlineText { text: "a".into() }, |leaf| {
                leaf.text("never attached");
            });
        });

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.root().plain_text(), "a");
    }

    #[test]
    fn test_illegal_nesting_is_accepted() {
        let doc = Document::build(|root| {
            root.cell(|c| {
                c.text("stray cell");
            });
            root.item(|i| {
                i.text("stray item");
            });
        });

        let kinds: Vec<&str> = doc.root().children().map(|n| n.tag().kind()).collect();
        assert_eq!(kinds, vec!["tableCell", "listItem"]);
    }

    #[test]
    fn test_custom_root() {
        let doc = Document::build_with_root(NodeTag::Paragraph, |p| {
            p.text("fragment");
        });
        assert_eq!(doc.root().tag(), &NodeTag::Paragraph);
    }
}
