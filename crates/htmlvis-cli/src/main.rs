//! htmlvis CLI - annotated corpus document renderer.
//!
//! Provides commands for:
//! - `render`: Render a document with a visualization format
//! - `check`: Validate visualization config files
//! - `formats`: List the htmldoc formats of an ANNIS export
//! - `meta`: Print document metadata as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FormatsArgs, MetaArgs, RenderArgs};
use output::Output;

/// htmlvis - render annotated corpus documents to HTML.
#[derive(Parser)]
#[command(name = "htmlvis", version, about)]
struct Cli {
    /// Enable verbose output (log loaded formats and skipped elements).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an annotated document to HTML.
    Render(RenderArgs),
    /// Validate visualization config files.
    Check(CheckArgs),
    /// List the visualization formats of an ANNIS export.
    Formats(FormatsArgs),
    /// Print document metadata as JSON.
    Meta(MetaArgs),
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Formats(args) => args.execute(),
        Commands::Meta(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
