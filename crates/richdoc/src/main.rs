//! richdoc CLI - Rich-text document renderer.
//!
//! Provides commands for:
//! - `render`: Render a tree or block document to HTML
//! - `format`: Format markdown-subset prose as HTML
//! - `detect`: Print the dialect of a serialized document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DetectArgs, FormatArgs, RenderArgs};
use output::Output;

/// richdoc - Rich-text document renderer.
#[derive(Parser)]
#[command(name = "richdoc", version, about)]
struct Cli {
    /// Enable verbose output (show skipped blocks and decode warnings).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a serialized document to an HTML fragment.
    Render(RenderArgs),
    /// Format markdown-subset prose as HTML.
    Format(FormatArgs),
    /// Print the dialect of a serialized document.
    Detect(DetectArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        default_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Format(args) => args.execute(),
        Commands::Detect(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Filter from a `RUST_LOG`-style directive, falling back to WARN when unset or invalid.
fn default_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
