//! Document sources for Folio.
//!
//! A [`DocumentSource`] turns a document identifier (such as
//! `"guides/intro"`) into a decoded [`Document`](folio_doc::Document).
//!
//! The crate provides:
//! - [`FsSource`] reading `<root>/<identifier>.json` files
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use folio_source::{DocumentSource, FsSource};
//!
//! let source = FsSource::new("docs");
//! let doc = source.get_document("guides/intro")?;
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;

pub use fs::FsSource;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use source::{DocumentSource, SourceError, SourceErrorKind};
