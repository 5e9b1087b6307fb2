//! `folio render` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_navigation::{TrackerOptions, nav_panel_to_level, page_view};
use folio_source::DocumentSource;

use super::{DocumentArgs, load_document, renderer_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Write the HTML fragment to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open links in the same tab.
    #[arg(long)]
    same_tab_links: bool,

    /// Deepest heading level listed in the navigation panel (overrides config).
    #[arg(long)]
    max_level: Option<u8>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the document can't be loaded,
    /// or the output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.document.load_config(CliSettings {
            new_tab_links: self.same_tab_links.then_some(false),
            max_level: self.max_level,
            ..Default::default()
        })?;
        let source = DocumentArgs::source(&config);
        let html = render_page(&config, &source, &self.document.identifier)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!(
                    "Rendered {} to {}",
                    self.document.identifier,
                    path.display()
                ));
            }
            None => output.result(&html)?,
        }
        Ok(())
    }
}

/// Render `identifier` as a page fragment: the nav panel, then the article.
pub(crate) fn render_page(
    config: &Config,
    source: &dyn DocumentSource,
    identifier: &str,
) -> Result<String, CliError> {
    let doc = load_document(source, identifier)?;

    let start = std::time::Instant::now();
    let result = renderer_from_config(config).render(&doc);
    let nav = nav_panel_to_level(&result.outline, config.toc.max_level);
    let tracker = TrackerOptions {
        activation_ratio: config.toc.activation_ratio,
    };
    let html = page_view(nav, result.view, &tracker).to_html();

    tracing::info!(
        identifier,
        headings = result.outline.len(),
        bytes = html.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Rendered document"
    );
    Ok(html)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use folio_doc::{Document, ResourceLink};
    use folio_source::{FsSource, MockSource};
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Document {
        Document::build(|root| {
            root.heading(1, |h| {
                h.text("Intro");
            });
            root.heading(3, |h| {
                h.text("Details");
            });
            root.image(
                ResourceLink::Embedded {
                    resource_id: "chart".to_owned(),
                },
                None,
            );
        })
    }

    #[test]
    fn test_render_page_defaults() {
        let source = MockSource::new().with_document("intro", sample());
        let html = render_page(&Config::default(), &source, "intro").unwrap();

        assert_eq!(
            html,
            concat!(
                r#"<div class="page" data-activation-ratio="0.5">"#,
                r#"<nav class="toc"><ol class="toc-list">"#,
                r##"<li class="toc-item toc-level-1"><a class="toc-link" href="#1-Intro">Intro</a></li>"##,
                r##"<li class="toc-item toc-level-3"><a class="toc-link" href="#2-Details">Details</a></li>"##,
                r#"</ol></nav>"#,
                r#"<article class="document">"#,
                r#"<h2 class="heading" id="1-Intro">Intro</h2>"#,
                r#"<h4 class="heading" id="2-Details">Details</h4>"#,
                r#"<figure class="image image-broken">"#,
                r#"<div aria-label="Image unavailable" class="media-placeholder" role="img">Image unavailable</div>"#,
                r#"</figure></article></div>"#
            )
        );
    }

    #[test]
    fn test_render_page_applies_config() {
        let source = MockSource::new().with_document("intro", sample());
        let mut config = Config::default();
        config.resources.url_template = Some("/media/{id}".to_owned());
        config.toc.max_level = Some(2);
        config.toc.activation_ratio = 0.25;

        let html = render_page(&config, &source, "intro").unwrap();

        assert!(html.contains(r#"data-activation-ratio="0.25""#));
        assert!(html.contains(r#"src="/media/chart""#));
        assert!(!html.contains(r##"href="#2-Details""##));
        assert!(html.contains(r#"<h4 class="heading" id="2-Details">"#));
    }

    #[test]
    fn test_render_page_from_filesystem() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("folio.toml"),
            "[source]\ndir = \"content\"\n\n[render]\nnew_tab_links = false\n",
        )
        .unwrap();
        fs::create_dir_all(temp_dir.path().join("content/guides")).unwrap();
        fs::write(
            temp_dir.path().join("content/guides/setup.json"),
            r#"{"tag": {"kind": "root"}, "children": [
                {"tag": {"kind": "paragraph"}, "children": [
                    {"tag": {"kind": "inline", "link": "https://x.test"}, "children": [
                        {"tag": {"kind": "inlineText", "text": "link"}}
                    ]}
                ]},
                {"tag": {"kind": "timeline"}}
            ]}"#,
        )
        .unwrap();

        let config = Config::load(Some(&temp_dir.path().join("folio.toml")), None).unwrap();
        let source = FsSource::new(&config.source_resolved.dir);
        let html = render_page(&config, &source, "guides/setup").unwrap();

        assert!(html.contains(r#"<a class="link" href="https://x.test"><span>link</span></a>"#));
        assert!(html.contains(r#"<div class="unsupported" data-kind="timeline" role="note">"#));
    }

    #[test]
    fn test_render_page_missing_document() {
        let source = FsSource::new(Path::new("/nonexistent"));
        let result = render_page(&Config::default(), &source, "intro");
        assert!(matches!(result, Err(CliError::Source(_))));
    }
}
