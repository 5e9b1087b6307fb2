//! Document renderer combining TOC extraction and transformation.

use folio_doc::Document;

use crate::code::{Highlighter, PlainHighlighter};
use crate::resource::ResourceResolver;
use crate::toc::{HeadingAnchors, TocEntry, extract_toc};
use crate::transform::{RenderOptions, Transformer};
use crate::view::ViewNode;

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered content panel, rooted at `<article class="document">`.
    pub view: ViewNode,
    /// Table of contents entries in document order.
    pub outline: Vec<TocEntry>,
    /// Heading anchors of the rendered document.
    pub anchors: HeadingAnchors,
}

/// Renders documents with a configured resolver, highlighter and options.
///
/// # Example
///
/// ```
/// use folio_doc::{Document, ResourceLink};
/// use folio_renderer::{DocumentRenderer, UrlTemplateResolver};
///
/// let doc = Document::build(|root| {
///     root.image(ResourceLink::Embedded { resource_id: "chart".into() }, None);
/// });
///
/// let renderer = DocumentRenderer::new()
///     .with_resolver(UrlTemplateResolver::new("/media/{id}"));
/// let html = renderer.render(&doc).view.to_html();
/// assert!(html.contains(r#"src="/media/chart""#));
/// ```
pub struct DocumentRenderer {
    resolver: Option<Box<dyn ResourceResolver>>,
    highlighter: Box<dyn Highlighter>,
    options: RenderOptions,
}

impl DocumentRenderer {
    /// Create a renderer with default options and no resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: None,
            highlighter: Box::new(PlainHighlighter),
            options: RenderOptions::default(),
        }
    }

    /// Set the resolver for embedded resources.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ResourceResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Set the code block highlighter.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `doc`.
    ///
    /// The outline is extracted before transformation so headings carry
    /// their anchor ids.
    #[must_use]
    pub fn render(&self, doc: &Document) -> RenderResult {
        let extraction = extract_toc(doc);

        let mut transformer = Transformer::new(&extraction.anchors, &self.options)
            .with_highlighter(self.highlighter.as_ref());
        if let Some(resolver) = &self.resolver {
            transformer = transformer.with_resolver(resolver.as_ref());
        }
        let view = transformer.transform(doc.root());

        tracing::debug!(
            document = %doc.id(),
            nodes = doc.len(),
            headings = extraction.outline.len(),
            "Rendered document"
        );

        RenderResult {
            view,
            outline: extraction.outline,
            anchors: extraction.anchors,
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use folio_doc::ResourceLink;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resource::MapResolver;

    fn sample() -> Document {
        Document::build(|root| {
            root.heading(1, |h| {
                h.text("Intro");
            });
            root.paragraph(|p| {
                p.text("Welcome.");
            });
            root.heading(2, |h| {
                h.text("Background");
            });
            root.heading(2, |h| {
                h.text("Method");
            });
        })
    }

    #[test]
    fn test_render_outline_matches_view_anchors() {
        let result = DocumentRenderer::new().render(&sample());

        let targets: Vec<&str> = result
            .outline
            .iter()
            .map(|e| e.target_id.as_str())
            .collect();
        assert_eq!(targets, vec!["1-Intro", "2-Background", "3-Method"]);

        let anchor_ids: Vec<&str> = result
            .view
            .elements()
            .filter_map(|e| e.mount.as_ref())
            .map(|role| role.target_id())
            .collect();
        assert_eq!(anchor_ids, targets);
    }

    #[test]
    fn test_render_html() {
        let result = DocumentRenderer::new().render(&sample());
        assert_eq!(
            result.view.to_html(),
            concat!(
                r#"<article class="document">"#,
                r#"<h2 class="heading" id="1-Intro">Intro</h2>"#,
                r#"<p class="paragraph">Welcome.</p>"#,
                r#"<h3 class="heading" id="2-Background">Background</h3>"#,
                r#"<h3 class="heading" id="3-Method">Method</h3>"#,
                r#"</article>"#
            )
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let doc = sample();
        let renderer = DocumentRenderer::default();
        let first = renderer.render(&doc);
        let second = renderer.render(&doc);
        assert_eq!(first.view, second.view);
        assert_eq!(first.outline, second.outline);
    }

    #[test]
    fn test_render_empty_document() {
        let doc = Document::build(|_| {});
        let result = DocumentRenderer::new().render(&doc);
        assert!(result.outline.is_empty());
        assert!(result.anchors.is_empty());
        assert_eq!(result.view.to_html(), r#"<article class="document"></article>"#);
    }

    #[test]
    fn test_render_with_resolver_and_options() {
        let doc = Document::build(|root| {
            root.image(
                ResourceLink::Embedded {
                    resource_id: "a".to_owned(),
                },
                None,
            );
            root.link("https://x.test", |l| {
                l.text("x");
            });
        });
        let renderer = DocumentRenderer::new()
            .with_resolver(MapResolver::new().with("a", "/a.png"))
            .with_options(RenderOptions {
                new_tab_links: false,
                ..RenderOptions::default()
            });

        assert!(!renderer.options().new_tab_links);
        let html = renderer.render(&doc).view.to_html();
        assert!(html.contains(r#"src="/a.png""#));
        assert!(!html.contains("_blank"));
    }
}
