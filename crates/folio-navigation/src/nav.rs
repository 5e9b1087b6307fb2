//! Navigation panel view.

use folio_renderer::{MountRole, TocEntry, ViewElement, ViewNode};

use crate::tracker::TrackerOptions;

/// Build the navigation panel for `outline`.
///
/// Each link carries [`MountRole::NavItem`] so mounting it completes the
/// registry entry of the matching heading.
#[must_use]
pub fn nav_panel(outline: &[TocEntry]) -> ViewNode {
    nav_panel_to_level(outline, None)
}

/// Build the navigation panel, leaving out entries deeper than `max_level`.
///
/// Omitted headings keep their anchors in the content panel; they simply
/// never become complete registry entries.
#[must_use]
pub fn nav_panel_to_level(outline: &[TocEntry], max_level: Option<u8>) -> ViewNode {
    let items = outline
        .iter()
        .filter(|entry| max_level.is_none_or(|max| entry.level <= max))
        .map(|entry| {
            let item = ViewElement::new("li")
                .class(format!("toc-item toc-level-{}", entry.level))
                .child(
                    ViewElement::new("a")
                        .class("toc-link")
                        .attr("href", entry.href())
                        .mount(MountRole::NavItem(entry.target_id.clone()))
                        .child(ViewNode::text(&entry.title)),
                );
            ViewNode::from(item)
        });

    ViewElement::new("nav")
        .class("toc")
        .child(ViewElement::new("ol").class("toc-list").children(items))
        .into()
}

/// Lay out a page with the navigation panel before the content.
///
/// The activation ratio is exposed as `data-activation-ratio` for the
/// host-side tracker.
#[must_use]
pub fn page_view(nav: ViewNode, content: ViewNode, options: &TrackerOptions) -> ViewNode {
    ViewElement::new("div")
        .class("page")
        .attr("data-activation-ratio", options.activation_ratio.to_string())
        .child(nav)
        .child(content)
        .into()
}
