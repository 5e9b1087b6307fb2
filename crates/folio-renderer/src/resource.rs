//! Resolution of embedded resource ids to URLs.

use std::collections::HashMap;

use crate::util::encode_component;

/// Placeholder substituted by [`UrlTemplateResolver`].
const ID_PLACEHOLDER: &str = "{id}";

/// Error resolving an embedded resource.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The resolver knows no resource with this id.
    #[error("Resource not found: {0}")]
    NotFound(String),
    /// The id cannot name a resource.
    #[error("Invalid resource id: {0:?}")]
    Invalid(String),
}

/// Maps embedded resource ids to URLs.
pub trait ResourceResolver {
    /// Return the URL serving `resource_id`.
    fn resolve(&self, resource_id: &str) -> Result<String, ResolveError>;
}

impl<F> ResourceResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError>,
{
    fn resolve(&self, resource_id: &str) -> Result<String, ResolveError> {
        self(resource_id)
    }
}

/// Resolver that substitutes the percent-encoded id into a URL template.
///
/// # Example
///
/// ```
/// use folio_renderer::{ResourceResolver, UrlTemplateResolver};
///
/// let resolver = UrlTemplateResolver::new("https://cdn.example.com/res/{id}");
/// assert_eq!(
///     resolver.resolve("a b").unwrap(),
///     "https://cdn.example.com/res/a%20b"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct UrlTemplateResolver {
    template: String,
}

impl UrlTemplateResolver {
    /// Create a resolver for `template`, which should contain `{id}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl ResourceResolver for UrlTemplateResolver {
    fn resolve(&self, resource_id: &str) -> Result<String, ResolveError> {
        if resource_id.trim().is_empty() {
            return Err(ResolveError::Invalid(resource_id.to_owned()));
        }
        Ok(self
            .template
            .replace(ID_PLACEHOLDER, &encode_component(resource_id)))
    }
}

/// Resolver backed by a fixed id-to-URL table.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    urls: HashMap<String, String>,
}

impl MapResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource.
    #[must_use]
    pub fn with(mut self, resource_id: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(resource_id.into(), url.into());
        self
    }
}

impl ResourceResolver for MapResolver {
    fn resolve(&self, resource_id: &str) -> Result<String, ResolveError> {
        self.urls
            .get(resource_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(resource_id.to_owned()))
    }
}
