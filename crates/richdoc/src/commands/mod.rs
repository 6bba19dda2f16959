//! CLI command implementations.

mod detect;
mod format;
mod render;

use std::io::{self, Read, Write};
use std::path::Path;

pub(crate) use detect::DetectArgs;
pub(crate) use format::FormatArgs;
pub(crate) use render::RenderArgs;

use crate::error::CliError;

/// Read command input from a file, or from stdin when the path is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::info!(path = %path.display(), "Reading input");
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Write one line of command output to stdout.
fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"blocks": []}"#).unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), r#"{"blocks": []}"#);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/doc.json"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
