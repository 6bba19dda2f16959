//! `richdoc format` command implementation.

use std::path::PathBuf;

use clap::Args;
use richdoc_render::format_prose;

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Arguments for the format command.
#[derive(Args)]
pub(crate) struct FormatArgs {
    /// Prose to format (default: stdin, also `-`).
    path: Option<PathBuf>,
}

impl FormatArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input = read_input(self.path.as_deref())?;
        write_stdout(&format_prose(&input))
    }
}
