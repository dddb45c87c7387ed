//! Folio CLI - content page preview.
//!
//! Provides commands for:
//! - `render`: Render a page from a JSON page file
//! - `list`: List pages in navigation order
//! - `slugify`: Print the slug generated for a text

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, RenderArgs, SlugifyArgs};
use output::Output;

/// Folio - content page rendering.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (page view and extraction logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page as HTML or JSON.
    Render(RenderArgs),
    /// List pages in navigation order.
    List(ListArgs),
    /// Print the slug generated for a text.
    Slugify(SlugifyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::List(args) => args.execute(),
        Commands::Slugify(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
