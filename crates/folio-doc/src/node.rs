//! Node tags and their payloads.

use serde::Deserialize;

/// Content kind of a document node.
///
/// The set is closed; anything the wire decoder does not recognize becomes
/// [`NodeTag::Unsupported`] so the rest of the document stays readable.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeTag {
    /// The document root.
    Root,
    Paragraph,
    /// Section heading. Level 1 is the most prominent; deeper levels are accepted as-is.
    Heading { level: u8 },
    Callout {
        #[serde(default)]
        emoji: Option<String>,
    },
    Quote,
    List {
        #[serde(default)]
        ordered: bool,
    },
    ListItem,
    Code {
        #[serde(default)]
        language: String,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        code: String,
    },
    Equation {
        expr: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Image {
        link: ResourceLink,
        #[serde(default)]
        caption: Option<String>,
    },
    Table {
        #[serde(default)]
        caption: Option<String>,
    },
    TableRow,
    TableCell,
    Divider,
    /// A styled and/or hyperlinked inline run wrapping its children.
    Inline {
        #[serde(default)]
        style: Option<InlineStyle>,
        #[serde(default)]
        link: Option<String>,
    },
    InlineText { text: String },
    InlineCode { code: String },
    InlineEquation { expr: String },
    /// A tag outside the known set, kept so it can be rendered as a placeholder.
    #[serde(skip)]
    Unsupported { kind: String },
}

impl NodeTag {
    /// Whether this tag never carries children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::InlineText { .. }
                | Self::InlineCode { .. }
                | Self::InlineEquation { .. }
                | Self::Divider
        )
    }

    /// Wire name of the tag (e.g. `"listItem"`).
    ///
    /// For [`NodeTag::Unsupported`] this is the unrecognized name as received.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Callout { .. } => "callout",
            Self::Quote => "quote",
            Self::List { .. } => "list",
            Self::ListItem => "listItem",
            Self::Code { .. } => "code",
            Self::Equation { .. } => "equation",
            Self::Image { .. } => "image",
            Self::Table { .. } => "table",
            Self::TableRow => "tableRow",
            Self::TableCell => "tableCell",
            Self::Divider => "divider",
            Self::Inline { .. } => "inline",
            Self::InlineText { .. } => "inlineText",
            Self::InlineCode { .. } => "inlineCode",
            Self::InlineEquation { .. } => "inlineEquation",
            Self::Unsupported { kind } => kind,
        }
    }
}

/// Link to an image or other media resource.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResourceLink {
    /// Absolute URL, used verbatim.
    External { url: String },
    /// Resource stored alongside the document, resolved to a URL at render time.
    Embedded {
        #[serde(rename = "resourceId")]
        resource_id: String,
    },
}

/// Style flags of an inline run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Palette token such as `"red"` or `"gray_background"`.
    pub color: Option<String>,
}

impl InlineStyle {
    /// A style with no flags set and no color.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    #[must_use]
    pub fn color(mut self, token: impl Into<String>) -> Self {
        self.color = Some(token.into());
        self
    }

    /// Whether the style has no visible effect.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_tags() {
        assert!(NodeTag::Divider.is_leaf());
        assert!(
            NodeTag::InlineText {
                text: String::new()
            }
            .is_leaf()
        );
        assert!(!NodeTag::Paragraph.is_leaf());
        assert!(
            !NodeTag::Unsupported {
                kind: "kanban".to_owned()
            }
            .is_leaf()
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NodeTag::ListItem.kind(), "listItem");
        assert_eq!(NodeTag::Heading { level: 2 }.kind(), "heading");
        assert_eq!(
            NodeTag::Unsupported {
                kind: "kanban".to_owned()
            }
            .kind(),
            "kanban"
        );
    }

    #[test]
    fn test_style_builder() {
        let style = InlineStyle::new().bold().color("red");
        assert!(style.bold);
        assert!(!style.italic);
        assert_eq!(style.color.as_deref(), Some("red"));
        assert!(!style.is_plain());
        assert!(InlineStyle::new().is_plain());
    }
}
