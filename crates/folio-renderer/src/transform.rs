//! Tree-to-view transformer.

use std::collections::HashMap;

use folio_doc::{InlineStyle, NodeRef, NodeTag, ResourceLink};

use crate::code::{Highlighter, PlainHighlighter, normalize_language};
use crate::palette::color_class;
use crate::resource::ResourceResolver;
use crate::toc::HeadingAnchors;
use crate::util::heading_tag;
use crate::view::{MountRole, ViewElement, ViewNode};

/// Rendering options.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Open hyperlinks in a new browsing context.
    pub new_tab_links: bool,
    /// Extra code language aliases, checked before the built-in table.
    pub code_aliases: HashMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            new_tab_links: true,
            code_aliases: HashMap::new(),
        }
    }
}

/// Maps document nodes to view elements.
///
/// Each node becomes exactly one view node. Children are rendered first and
/// then placed into the parent's content region.
pub struct Transformer<'a> {
    anchors: &'a HeadingAnchors,
    options: &'a RenderOptions,
    resolver: Option<&'a dyn ResourceResolver>,
    highlighter: &'a dyn Highlighter,
}

impl<'a> Transformer<'a> {
    /// Create a transformer using `anchors` for heading ids.
    ///
    /// Without a resolver every embedded image renders as a placeholder.
    #[must_use]
    pub fn new(anchors: &'a HeadingAnchors, options: &'a RenderOptions) -> Self {
        Self {
            anchors,
            options,
            resolver: None,
            highlighter: &PlainHighlighter,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn ResourceResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a dyn Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Render `node` and its subtree.
    #[must_use]
    pub fn transform(&self, node: NodeRef<'_>) -> ViewNode {
        match node.tag() {
            NodeTag::Root => ViewElement::new("article")
                .class("document")
                .children(self.children(node))
                .into(),
            NodeTag::Paragraph => self.container("p", "paragraph", node),
            NodeTag::Heading { level } => self.heading(*level, node),
            NodeTag::Callout { emoji } => self.callout(emoji.as_deref(), node),
            NodeTag::Quote => self.container("blockquote", "quote", node),
            NodeTag::List { ordered } => {
                self.container(if *ordered { "ol" } else { "ul" }, "list", node)
            }
            NodeTag::ListItem => self.container("li", "list-item", node),
            NodeTag::Code {
                language,
                caption,
                code,
            } => self.code(language, caption.as_deref(), code),
            NodeTag::Equation { expr, caption } => figure("equation", caption.as_deref())
                .child(
                    ViewElement::new("div")
                        .class("math math-display")
                        .child(ViewNode::text(expr)),
                )
                .into(),
            NodeTag::Image { link, caption } => self.image(link, caption.as_deref()),
            NodeTag::Table { caption } => self.table(caption.as_deref(), node),
            NodeTag::TableRow => self.container("tr", "table-row", node),
            NodeTag::TableCell => self.container("td", "table-cell", node),
            NodeTag::Divider => ViewElement::new("hr").class("divider").into(),
            NodeTag::Inline { style, link } => self.inline(style.as_ref(), link.as_deref(), node),
            NodeTag::InlineText { text } => ViewNode::text(text),
            NodeTag::InlineCode { code } => ViewElement::new("code")
                .class("inline-code")
                .child(ViewNode::text(code))
                .into(),
            NodeTag::InlineEquation { expr } => ViewElement::new("span")
                .class("math math-inline")
                .child(ViewNode::text(expr))
                .into(),
            NodeTag::Unsupported { kind } => self.unsupported(kind, node),
        }
    }

    fn children(&self, node: NodeRef<'_>) -> Vec<ViewNode> {
        node.children().map(|child| self.transform(child)).collect()
    }

    fn container(&self, tag: &'static str, class: &str, node: NodeRef<'_>) -> ViewNode {
        ViewElement::new(tag)
            .class(class)
            .children(self.children(node))
            .into()
    }

    fn heading(&self, level: u8, node: NodeRef<'_>) -> ViewNode {
        let mut element = ViewElement::new(heading_tag(level))
            .class("heading")
            .children(self.children(node));

        if let Some(id) = self.anchors.get(node) {
            element = element
                .attr("id", id)
                .mount(MountRole::HeadingAnchor(id.to_owned()));
        }

        element.into()
    }

    fn callout(&self, emoji: Option<&str>, node: NodeRef<'_>) -> ViewNode {
        let mut element = ViewElement::new("aside").class("callout");
        if let Some(emoji) = emoji {
            element = element.child(
                ViewElement::new("div")
                    .class("callout-icon")
                    .child(ViewNode::text(emoji)),
            );
        }
        element
            .child(
                ViewElement::new("div")
                    .class("callout-content")
                    .children(self.children(node)),
            )
            .into()
    }

    fn code(&self, language: &str, caption: Option<&str>, code: &str) -> ViewNode {
        let language = normalize_language(language, &self.options.code_aliases);

        let mut code_el =
            ViewElement::new("code").children(self.highlighter.highlight(&language, code));
        if !language.trim().is_empty() {
            code_el = code_el
                .class(format!("language-{language}"))
                .attr("data-language", language);
        }

        figure("code", caption)
            .child(ViewElement::new("pre").child(code_el))
            .into()
    }

    fn image(&self, link: &ResourceLink, caption: Option<&str>) -> ViewNode {
        let src = match link {
            ResourceLink::External { url } => Some(url.clone()),
            ResourceLink::Embedded { resource_id } => match self.resolver {
                Some(resolver) => resolver
                    .resolve(resource_id)
                    .inspect_err(|e| {
                        tracing::warn!(
                            resource_id = %resource_id,
                            error = %e,
                            "Failed to resolve image"
                        );
                    })
                    .ok(),
                None => {
                    tracing::warn!(resource_id = %resource_id, "No resource resolver configured");
                    None
                }
            },
        };

        let body = match src {
            Some(src) => ViewElement::new("img")
                .attr("src", src)
                .attr("alt", caption.unwrap_or_default())
                .attr("loading", "lazy"),
            None => ViewElement::new("div")
                .class("media-placeholder")
                .attr("role", "img")
                .attr("aria-label", "Image unavailable")
                .child(ViewNode::text("Image unavailable")),
        };

        let class = if body.tag == "img" {
            "image"
        } else {
            "image image-broken"
        };
        figure(class, caption).child(body).into()
    }

    fn table(&self, caption: Option<&str>, node: NodeRef<'_>) -> ViewNode {
        let mut element = ViewElement::new("table").class("table");
        if let Some(caption) = caption {
            element = element.child(ViewElement::new("caption").child(ViewNode::text(caption)));
        }
        element
            .child(ViewElement::new("tbody").children(self.children(node)))
            .into()
    }

    fn inline(
        &self,
        style: Option<&InlineStyle>,
        link: Option<&str>,
        node: NodeRef<'_>,
    ) -> ViewNode {
        let mut span = ViewElement::new("span").children(self.children(node));

        let classes = style.map(style_classes).unwrap_or_default();
        if !classes.is_empty() {
            span = span.class(classes.join(" "));
        }

        let Some(href) = link else {
            return span.into();
        };

        let mut anchor = ViewElement::new("a").class("link").attr("href", href);
        if self.options.new_tab_links {
            anchor = anchor
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer");
        }
        anchor.child(span).into()
    }

    /// Placeholder for a tag outside the known set.
    ///
    /// Children are still rendered so nested headings keep their anchors.
    fn unsupported(&self, kind: &str, node: NodeRef<'_>) -> ViewNode {
        tracing::warn!(kind = %kind, "Rendering placeholder for unsupported node");
        ViewElement::new("div")
            .class("unsupported")
            .attr("data-kind", kind)
            .attr("role", "note")
            .child(
                ViewElement::new("div")
                    .class("unsupported-label")
                    .child(ViewNode::text("Unsupported content")),
            )
            .children(self.children(node))
            .into()
    }
}

/// CSS classes for an inline style, in a fixed order.
fn style_classes(style: &InlineStyle) -> Vec<String> {
    let mut classes = Vec::new();
    if let Some(token) = &style.color {
        match color_class(token) {
            Some(class) => classes.push(class),
            None => tracing::debug!(color = %token, "Dropping unknown color token"),
        }
    }
    for (set, class) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strikethrough, "strikethrough"),
    ] {
        if set {
            classes.push(class.to_owned());
        }
    }
    classes
}

/// A `<figure>` with an optional trailing caption slot filled later.
///
/// The caption is appended after the body by [`FigureBuilder::child`].
fn figure(class: &str, caption: Option<&str>) -> FigureBuilder {
    FigureBuilder {
        element: ViewElement::new("figure").class(class),
        caption: caption.map(ToOwned::to_owned),
    }
}

struct FigureBuilder {
    element: ViewElement,
    caption: Option<String>,
}

impl FigureBuilder {
    fn child(self, body: impl Into<ViewNode>) -> ViewElement {
        let element = self.element.child(body);
        match self.caption {
            Some(caption) => {
                element.child(ViewElement::new("figcaption").child(ViewNode::text(caption)))
            }
            None => element,
        }
    }
}
