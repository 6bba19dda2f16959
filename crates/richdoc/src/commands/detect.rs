//! `richdoc detect` command implementation.

use std::path::PathBuf;

use clap::Args;
use richdoc_render::Dialect;

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Arguments for the detect command.
#[derive(Args)]
pub(crate) struct DetectArgs {
    /// Document to inspect (default: stdin, also `-`).
    path: Option<PathBuf>,
}

impl DetectArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input = read_input(self.path.as_deref())?;
        write_stdout(Dialect::detect(&input).as_str())
    }
}
