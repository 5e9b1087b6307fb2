//! Table of contents extraction and tree-to-view rendering.
//!
//! Rendering a [`Document`](folio_doc::Document) is a two-step pipeline:
//!
//! 1. [`extract_toc`] walks the tree once in pre-order, producing the outline
//!    ([`TocEntry`] list) and the [`HeadingAnchors`] association from heading
//!    nodes to their anchor ids.
//! 2. [`Transformer`] maps every node to a [`ViewNode`], tagging heading
//!    elements with the anchor id looked up in [`HeadingAnchors`].
//!
//! Both steps never fail. Content that cannot be rendered properly (unknown
//! tags, unresolvable images, illegal nesting) degrades to a visible placeholder
//! or a best-effort structure.
//!
//! Format-specific pieces sit behind small traits:
//! - [`ResourceResolver`]: maps embedded resource ids to URLs
//! - [`Highlighter`]: produces the contents of code blocks
//!
//! # Example
//!
//! ```
//! use folio_doc::Document;
//! use folio_renderer::DocumentRenderer;
//!
//! let doc = Document::build(|root| {
//!     root.heading(1, |h| {
//!         h.text("Intro");
//!     });
//! });
//!
//! let result = DocumentRenderer::new().render(&doc);
//! assert_eq!(result.outline[0].target_id, "1-Intro");
//! assert!(result.view.to_html().contains(r#"<h2 class="heading" id="1-Intro">"#));
//! ```

mod code;
mod palette;
mod renderer;
mod resource;
mod toc;
mod transform;
mod util;
mod view;

pub use code::{Highlighter, PlainHighlighter, normalize_language};
pub use palette::color_class;
pub use renderer::{DocumentRenderer, RenderResult};
pub use resource::{MapResolver, ResolveError, ResourceResolver, UrlTemplateResolver};
pub use toc::{Extraction, HeadingAnchors, TocEntry, extract_toc};
pub use transform::{RenderOptions, Transformer};
pub use util::encode_component;
pub use view::{MountRole, ViewElement, ViewNode, escape_html};
