//! Configuration management for richdoc.
//!
//! Parses `richdoc.toml` configuration files with serde and provides
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
//! Bare `$VAR` syntax is not expanded.
//!
//! Expanded fields:
//! - `render.class_prefix`
//! - `render.default_code_language`

mod expand;

use std::path::{Path, PathBuf};

use richdoc_render::{DEFAULT_CLASS_PREFIX, DEFAULT_CODE_LANGUAGE, RenderOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "richdoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override CSS class prefix.
    pub class_prefix: Option<String>,
    /// Override default code block language.
    pub default_code_language: Option<String>,
    /// Override URL sanitizing.
    pub sanitize_urls: Option<bool>,
    /// Override block-dialect markup escaping.
    pub escape_block_html: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// CSS class prefix for block-dialect fragments.
    pub class_prefix: String,
    /// Language assumed for code blocks without one.
    pub default_code_language: String,
    /// Neutralize script and `data:` URLs in links and images.
    pub sanitize_urls: bool,
    /// Escape block-dialect text fields instead of trusting them as markup.
    pub escape_block_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            default_code_language: DEFAULT_CODE_LANGUAGE.to_owned(),
            sanitize_urls: false,
            escape_block_html: false,
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
        /// Config field path (e.g., "`render.class_prefix`").
        field: String,
        /// Error message (e.g., "${`RICHDOC_PREFIX`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `richdoc.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
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
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Renderer options described by this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            class_prefix: self.render.class_prefix.clone(),
            default_code_language: self.render.default_code_language.clone(),
            sanitize_urls: self.render.sanitize_urls,
            escape_block_html: self.render.escape_block_html,
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(prefix) = &settings.class_prefix {
            self.render.class_prefix.clone_from(prefix);
        }
        if let Some(language) = &settings.default_code_language {
            self.render.default_code_language.clone_from(language);
        }
        if let Some(sanitize) = settings.sanitize_urls {
            self.render.sanitize_urls = sanitize;
        }
        if let Some(escape) = settings.escape_block_html {
            self.render.escape_block_html = escape;
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;

        require_non_empty(&render.class_prefix, "render.class_prefix")?;
        if !render
            .class_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(
                "render.class_prefix may only contain ASCII letters, digits, '-' and '_'"
                    .to_owned(),
            ));
        }

        require_non_empty(&render.default_code_language, "render.default_code_language")?;
        if render.default_code_language.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "render.default_code_language cannot contain whitespace".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.class_prefix =
            expand::expand_env(&self.render.class_prefix, "render.class_prefix")?;
        self.render.default_code_language = expand::expand_env(
            &self.render.default_code_language,
            "render.default_code_language",
        )?;
        Ok(())
    }
}
