//! `richdoc render` command implementation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use richdoc_config::{CliSettings, Config};
use richdoc_render::{Dialect, RenderOptions, UnknownDialect, render_as, render_auto};

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Dialect selection for the render command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DialectChoice {
    /// Detect the dialect from the input.
    Auto,
    /// Force a specific dialect.
    Fixed(Dialect),
}

impl FromStr for DialectChoice {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

impl fmt::Display for DialectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(dialect) => fmt::Display::fmt(dialect, f),
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render (default: stdin, also `-`).
    path: Option<PathBuf>,

    /// Input dialect: auto, tree or block.
    #[arg(short, long, default_value = "auto")]
    dialect: DialectChoice,

    /// Path to configuration file (default: auto-discover richdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSS class prefix for block fragments (overrides config).
    #[arg(long)]
    class_prefix: Option<String>,

    /// Language for code blocks without one (overrides config).
    #[arg(long)]
    default_code_language: Option<String>,

    /// Escape block text fields instead of trusting them as markup.
    #[arg(long)]
    escape_block_html: bool,

    /// Neutralize javascript:, vbscript: and data: URLs.
    #[arg(long)]
    sanitize_urls: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be loaded, or if the
    /// document has nothing to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            class_prefix: self.class_prefix,
            default_code_language: self.default_code_language,
            sanitize_urls: self.sanitize_urls.then_some(true),
            escape_block_html: self.escape_block_html.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let input = read_input(self.path.as_deref())?;
        let html = render(self.dialect, &input, &config.render_options())
            .ok_or(CliError::NothingToRender)?;
        write_stdout(&html)
    }
}

fn render(choice: DialectChoice, input: &str, options: &RenderOptions) -> Option<String> {
    match choice {
        DialectChoice::Auto => render_auto(input, options),
        DialectChoice::Fixed(dialect) => render_as(dialect, input, options),
    }
}
