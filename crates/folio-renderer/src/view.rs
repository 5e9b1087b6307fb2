//! View tree produced by the transformer, with HTML serialization.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Elements without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// Registry notification an element triggers when it is mounted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountRole {
    /// Scroll target of a heading in the content panel.
    HeadingAnchor(String),
    /// Link to a heading in the navigation panel.
    NavItem(String),
}

impl MountRole {
    /// Anchor id the role refers to.
    #[must_use]
    pub fn target_id(&self) -> &str {
        match self {
            Self::HeadingAnchor(id) | Self::NavItem(id) => id,
        }
    }
}

/// A node in the view tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewNode {
    Text(String),
    Element(ViewElement),
}

impl ViewNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Serialize the node and its subtree to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(4096);
        self.write_html(&mut out);
        out
    }

    /// Append the HTML serialization of this node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Element(element) => element.write_html(out),
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&ViewElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Pre-order iterator over all elements in this subtree.
    pub fn elements(&self) -> impl Iterator<Item = &ViewElement> {
        let mut stack: Vec<&ViewNode> = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                if let Self::Element(element) = node {
                    stack.extend(element.children.iter().rev());
                    return Some(element);
                }
            }
            None
        })
    }

    /// Concatenated text content of this subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(element) => element.children.iter().map(Self::text_content).collect(),
        }
    }
}

impl From<ViewElement> for ViewNode {
    fn from(element: ViewElement) -> Self {
        Self::Element(element)
    }
}

/// An element of the view tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewElement {
    /// Tag name.
    pub tag: &'static str,
    /// Attributes, serialized in key order.
    pub attrs: BTreeMap<&'static str, String>,
    pub children: Vec<ViewNode>,
    /// Registry notification on mount, if any.
    pub mount: Option<MountRole>,
}

impl ViewElement {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: BTreeMap::new(),
            children: Vec::new(),
            mount: None,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn mount(mut self, role: MountRole) -> Self {
        self.mount = Some(role);
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        write!(out, "</{}>", self.tag).unwrap();
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
