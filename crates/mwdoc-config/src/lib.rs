//! Configuration management for mwdoc.
//!
//! Parses `mwdoc.toml` configuration files with serde and provides
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
//! - `wiki.api_url`
//! - `wiki.index_url`
//! - `wiki.external_base`
//! - `document.root`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override root page title.
    pub root: Option<String>,
    /// Override outline section heading.
    pub keyword: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override root text inclusion.
    pub include_root_text: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mwdoc.toml";

const DEFAULT_KEYWORD: &str = "Contents";
const DEFAULT_OUTPUT_DIR: &str = "build";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wiki connection configuration (required by network commands).
    pub wiki: Option<WikiConfig>,
    /// Document configuration (paths are relative strings from TOML).
    document: DocumentConfigRaw,

    /// Resolved document configuration (set after loading).
    #[serde(skip)]
    pub document_resolved: DocumentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Wiki connection configuration.
#[derive(Debug, Deserialize)]
pub struct WikiConfig {
    /// Action API endpoint (`.../api.php`).
    pub api_url: String,
    /// Script endpoint (`.../index.php`), derived from `api_url` if unset.
    pub index_url: Option<String>,
    /// Prefix for citation URLs, defaults to `{index_url}/`.
    pub external_base: Option<String>,
}

impl WikiConfig {
    /// Script endpoint URL.
    #[must_use]
    pub fn index_url(&self) -> String {
        if let Some(url) = &self.index_url {
            return url.clone();
        }
        match self.api_url.strip_suffix("api.php") {
            Some(prefix) => format!("{prefix}index.php"),
            None => self.api_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Prefix that normalized titles are appended to in citations.
    #[must_use]
    pub fn external_base(&self) -> String {
        self.external_base
            .clone()
            .unwrap_or_else(|| format!("{}/", self.index_url()))
    }

    /// Validate that all fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api_url, "wiki.api_url")?;
        require_http_url(&self.api_url, "wiki.api_url")?;
        if let Some(url) = &self.index_url {
            require_http_url(url, "wiki.index_url")?;
        }
        if let Some(url) = &self.external_base {
            require_http_url(url, "wiki.external_base")?;
        }
        Ok(())
    }
}

/// Raw document configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocumentConfigRaw {
    root: Option<String>,
    keyword: Option<String>,
    image_suffixes: Option<Vec<String>>,
    include_root_text: Option<bool>,
    output_dir: Option<String>,
}

/// Resolved document configuration with absolute paths.
#[derive(Debug)]
pub struct DocumentConfig {
    /// Root page title.
    pub root: Option<String>,
    /// Outline section heading.
    pub keyword: String,
    /// File suffixes treated as images.
    pub image_suffixes: Vec<String>,
    /// Whether root page text around the outline is kept.
    pub include_root_text: bool,
    /// Directory that receives the compiled document and images.
    pub output_dir: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            root: None,
            keyword: DEFAULT_KEYWORD.to_owned(),
            image_suffixes: default_image_suffixes(),
            include_root_text: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

fn default_image_suffixes() -> Vec<String> {
    [".png", ".jpeg", ".jpg"]
        .into_iter()
        .map(str::to_owned)
        .collect()
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
        /// Config field path (e.g., "`wiki.api_url`").
        field: String,
        /// Error message (e.g., "${`WIKI_HOST`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mwdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let document = &mut self.document_resolved;
        if let Some(root) = &settings.root {
            document.root = Some(root.clone());
        }
        if let Some(keyword) = &settings.keyword {
            document.keyword.clone_from(keyword);
        }
        if let Some(output_dir) = &settings.output_dir {
            document.output_dir.clone_from(output_dir);
        }
        if let Some(include_root_text) = settings.include_root_text {
            document.include_root_text = include_root_text;
        }
    }

    /// Get validated wiki configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `[wiki]` section is missing or invalid.
    pub fn require_wiki(&self) -> Result<&WikiConfig, ConfigError> {
        let wiki = self
            .wiki
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[wiki] section required in config".into()))?;
        wiki.validate()?;
        Ok(wiki)
    }

    /// Get the root page title.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no root page is configured.
    pub fn require_root(&self) -> Result<&str, ConfigError> {
        match self.document_resolved.root.as_deref() {
            Some(root) if !root.trim().is_empty() => Ok(root),
            _ => Err(ConfigError::Validation(
                "document.root is required (set it in config or pass ROOT)".to_owned(),
            )),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
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
            wiki: None,
            document: DocumentConfigRaw::default(),
            document_resolved: DocumentConfig {
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                ..DocumentConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. The `[wiki]` section is
    /// checked only if present; see [`Config::require_wiki`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(wiki) = &self.wiki {
            wiki.validate()?;
        }
        self.validate_document()
    }

    /// Validate document configuration.
    fn validate_document(&self) -> Result<(), ConfigError> {
        let document = &self.document_resolved;
        require_non_empty(document.keyword.trim(), "document.keyword")?;

        if let Some(suffix) = document
            .image_suffixes
            .iter()
            .find(|s| !s.starts_with('.') || s.len() < 2)
        {
            return Err(ConfigError::Validation(format!(
                "document.image_suffixes entry \"{suffix}\" must start with '.'"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut wiki) = self.wiki {
            wiki.api_url = expand::expand_env(&wiki.api_url, "wiki.api_url")?;
            wiki.index_url = expand::expand_opt(wiki.index_url.as_deref(), "wiki.index_url")?;
            wiki.external_base =
                expand::expand_opt(wiki.external_base.as_deref(), "wiki.external_base")?;
        }

        self.document.root = expand::expand_opt(self.document.root.as_deref(), "document.root")?;

        Ok(())
    }

    /// Resolve raw document settings, joining paths onto the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        let raw = &self.document;
        self.document_resolved = DocumentConfig {
            root: raw.root.clone(),
            keyword: raw
                .keyword
                .clone()
                .unwrap_or_else(|| DEFAULT_KEYWORD.to_owned()),
            image_suffixes: raw
                .image_suffixes
                .clone()
                .unwrap_or_else(default_image_suffixes),
            include_root_text: raw.include_root_text.unwrap_or(false),
            output_dir: config_dir.join(raw.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
        };
    }
}
