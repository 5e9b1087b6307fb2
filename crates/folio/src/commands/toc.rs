//! `folio toc` command implementation.

use clap::Args;
use folio_config::CliSettings;
use folio_renderer::extract_toc;
use folio_source::DocumentSource;

use super::{DocumentArgs, load_document};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document can't be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.document.load_config(CliSettings::default())?;
        let source = DocumentArgs::source(&config);
        let json = outline_json(&source, &self.document.identifier)?;
        Output::new().result(&json)?;
        Ok(())
    }
}

/// Extract the outline of `identifier` as pretty-printed JSON.
///
/// Every heading is listed; `toc.max_level` only applies to the nav panel.
pub(crate) fn outline_json(
    source: &dyn DocumentSource,
    identifier: &str,
) -> Result<String, CliError> {
    let doc = load_document(source, identifier)?;
    let extraction = extract_toc(&doc);
    Ok(serde_json::to_string_pretty(&extraction.outline)?)
}
