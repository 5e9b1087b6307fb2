//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `source.dir`
//! - `resources.url_template`

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Placeholder every resource URL template must contain.
const ID_PLACEHOLDER: &str = "{id}";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document source directory.
    pub source_dir: Option<PathBuf>,
    /// Override resource URL template.
    pub url_template: Option<String>,
    /// Override new-tab behavior of links.
    pub new_tab_links: Option<bool>,
    /// Override deepest heading level shown in the nav panel.
    pub max_level: Option<u8>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document source (paths are relative strings from TOML).
    source: SourceConfigRaw,
    /// Embedded resource configuration.
    pub resources: ResourcesConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Table of contents configuration.
    pub toc: TocConfig,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw source configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    dir: Option<String>,
}

/// Resolved source configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SourceConfig {
    /// Directory holding `<identifier>.json` documents.
    pub dir: PathBuf,
}

/// Embedded resource configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// URL template with an `{id}` placeholder. Without one, embedded
    /// images render as placeholders.
    pub url_template: Option<String>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Open hyperlinks in a new tab.
    pub new_tab_links: bool,
    /// Extra code language aliases (`alias = "language"`).
    pub code_aliases: HashMap<String, String>,
}

impl RenderConfig {
    /// Trim and lowercase alias keys, matching how code block languages are
    /// looked up.
    fn normalize_aliases(&mut self) {
        self.code_aliases = std::mem::take(&mut self.code_aliases)
            .into_iter()
            .map(|(alias, language)| (alias.trim().to_lowercase(), language))
            .collect();
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            new_tab_links: true,
            code_aliases: HashMap::new(),
        }
    }
}

/// Table of contents configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Fraction of the viewport height a heading must pass to become active.
    pub activation_ratio: f64,
    /// Deepest heading level listed in the nav panel.
    pub max_level: Option<u8>,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            activation_ratio: 0.5,
            max_level: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`source.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to be absolute (http:// or https://) or root-relative.
fn require_url_or_path(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") && !url.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.source_resolved.dir.clone_from(source_dir);
        }
        if let Some(url_template) = &settings.url_template {
            self.resources.url_template = Some(url_template.clone());
        }
        if let Some(new_tab_links) = settings.new_tab_links {
            self.render.new_tab_links = new_tab_links;
        }
        if let Some(max_level) = settings.max_level {
            self.toc.max_level = Some(max_level);
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            source: SourceConfigRaw::default(),
            resources: ResourcesConfig::default(),
            render: RenderConfig::default(),
            toc: TocConfig::default(),
            source_resolved: SourceConfig {
                dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.render.normalize_aliases();

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_resources()?;
        self.validate_toc()?;
        Ok(())
    }

    fn validate_resources(&self) -> Result<(), ConfigError> {
        let Some(template) = &self.resources.url_template else {
            return Ok(());
        };

        require_non_empty(template, "resources.url_template")?;
        require_url_or_path(template, "resources.url_template")?;
        if !template.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "resources.url_template must contain {ID_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    fn validate_toc(&self) -> Result<(), ConfigError> {
        let ratio = self.toc.activation_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "toc.activation_ratio must be in (0, 1], got {ratio}"
            )));
        }
        if self.toc.max_level == Some(0) {
            return Err(ConfigError::Validation(
                "toc.max_level must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.source.dir {
            self.source.dir = Some(expand::expand_env(dir, "source.dir")?);
        }
        if let Some(ref template) = self.resources.url_template {
            self.resources.url_template =
                Some(expand::expand_env(template, "resources.url_template")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.source_resolved = SourceConfig {
            dir: config_dir.join(self.source.dir.as_deref().unwrap_or("docs")),
        };
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.source_resolved.dir, PathBuf::from("/test/docs"));
        assert!(config.resources.url_template.is_none());
        assert!(config.render.new_tab_links);
        assert!(config.render.code_aliases.is_empty());
        assert!((config.toc.activation_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.toc.max_level, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.new_tab_links);
        assert!((config.toc.activation_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[source]
dir = "content"

[resources]
url_template = "https://cdn.example.com/{id}"

[render]
new_tab_links = false

[render.code_aliases]
tf = "hcl"

[toc]
activation_ratio = 0.3
max_level = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.dir.as_deref(), Some("content"));
        assert_eq!(
            config.resources.url_template.as_deref(),
            Some("https://cdn.example.com/{id}")
        );
        assert!(!config.render.new_tab_links);
        assert_eq!(
            config.render.code_aliases.get("tf").map(String::as_str),
            Some("hcl")
        );
        assert!((config.toc.activation_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.toc.max_level, Some(3));
    }

    #[test]
    fn test_load_resolves_source_dir_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "[source]\ndir = \"content\"\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.source_resolved.dir, temp_dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_normalizes_code_alias_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(
            temp_dir.path(),
            "[render.code_aliases]\nTF = \"hcl\"\n\" Sh \" = \"posix-shell\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        let mut aliases: Vec<(&str, &str)> = config
            .render
            .code_aliases
            .iter()
            .map(|(alias, language)| (alias.as_str(), language.as_str()))
            .collect();
        aliases.sort_unstable();
        assert_eq!(aliases, vec![("sh", "posix-shell"), ("tf", "hcl")]);
    }

    #[test]
    fn test_load_default_source_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.source_resolved.dir, temp_dir.path().join("docs"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/folio.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "[toc\nmax_level = 2");

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_CDN", "https://cdn.test");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(
            temp_dir.path(),
            "[resources]\nurl_template = \"${FOLIO_TEST_CDN}/res/{id}\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config.resources.url_template.as_deref(),
            Some("https://cdn.test/res/{id}")
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_CDN");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_DIR");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "[source]\ndir = \"${FOLIO_TEST_UNSET_DIR}\"\n");

        let result = Config::load(Some(&path), None);
        assert!(matches!(
            result,
            Err(ConfigError::EnvVar { ref field, .. }) if field == "source.dir"
        ));
    }

    #[test]
    fn test_validate_url_template() {
        for (template, valid) in [
            ("https://cdn.example.com/{id}", true),
            ("http://localhost:8080/r/{id}.png", true),
            ("/media/{id}", true),
            ("", false),
            ("ftp://cdn.example.com/{id}", false),
            ("media/{id}", false),
            ("https://cdn.example.com/static.png", false),
        ] {
            let mut config = Config::default_with_base(Path::new("/test"));
            config.resources.url_template = Some(template.to_owned());
            assert_eq!(config.validate().is_ok(), valid, "{template:?}");
        }
    }

    #[test]
    fn test_validate_activation_ratio() {
        for (ratio, valid) in [
            (0.5, true),
            (1.0, true),
            (0.01, true),
            (0.0, false),
            (-0.5, false),
            (1.5, false),
            (f64::NAN, false),
        ] {
            let mut config = Config::default_with_base(Path::new("/test"));
            config.toc.activation_ratio = ratio;
            let result = config.validate();
            assert_eq!(result.is_ok(), valid, "{ratio}");
            if !valid {
                assert!(matches!(result, Err(ConfigError::Validation(_))));
            }
        }
    }

    #[test]
    fn test_validate_max_level() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.toc.max_level = Some(0);
        assert!(config.validate().is_err());

        config.toc.max_level = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "[toc]\nactivation_ratio = 2.0\n");

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));

        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            url_template: Some("/media/{id}".to_owned()),
            new_tab_links: Some(false),
            max_level: Some(2),
        };
        config.apply_cli_settings(&overrides);

        assert_eq!(config.source_resolved.dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.resources.url_template.as_deref(), Some("/media/{id}"));
        assert!(!config.render.new_tab_links);
        assert_eq!(config.toc.max_level, Some(2));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.source_resolved.dir, PathBuf::from("/test/docs"));
        assert!(config.render.new_tab_links);
    }

    #[test]
    fn test_cli_override_is_validated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "");
        let overrides = CliSettings {
            url_template: Some("no-placeholder".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "");
        let nested = temp_dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_ignores_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(CONFIG_FILENAME)).unwrap();
        let found = discover_config(temp_dir.path());
        assert_ne!(found, Some(temp_dir.path().join(CONFIG_FILENAME)));
    }
}
