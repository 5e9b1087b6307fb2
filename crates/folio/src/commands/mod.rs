//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod toc;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_doc::Document;
use folio_renderer::{DocumentRenderer, RenderOptions, UrlTemplateResolver};
use folio_source::{DocumentSource, FsSource};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use toc::TocArgs;

/// Arguments shared by commands that load a document.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Document identifier, e.g. `guides/intro` for `<source-dir>/guides/intro.json`.
    pub identifier: String,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Document source directory (overrides config).
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// URL template for embedded resources, containing `{id}` (overrides config).
    #[arg(long, env = "FOLIO_URL_TEMPLATE")]
    pub url_template: Option<String>,

    /// Enable verbose output (rendering warnings and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl DocumentArgs {
    /// Load configuration with these arguments applied on top of `settings`.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone(),
            url_template: self.url_template.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    /// Document source for the configured directory.
    pub(crate) fn source(config: &Config) -> FsSource {
        FsSource::new(&config.source_resolved.dir)
    }
}

/// Fetch a document, logging where it came from.
pub(crate) fn load_document(
    source: &dyn DocumentSource,
    identifier: &str,
) -> Result<Document, CliError> {
    let start = std::time::Instant::now();
    let doc = source.get_document(identifier)?;
    tracing::info!(
        identifier,
        nodes = doc.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Loaded document"
    );
    Ok(doc)
}

/// Build a renderer from the `[render]` and `[resources]` sections.
pub(crate) fn renderer_from_config(config: &Config) -> DocumentRenderer {
    let options = RenderOptions {
        new_tab_links: config.render.new_tab_links,
        code_aliases: config.render.code_aliases.clone(),
    };
    let renderer = DocumentRenderer::new().with_options(options);

    match &config.resources.url_template {
        Some(template) => renderer.with_resolver(UrlTemplateResolver::new(template.clone())),
        None => renderer,
    }
}
