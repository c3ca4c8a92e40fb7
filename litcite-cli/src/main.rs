//! # litcite CLI
//!
//! Command-line interface for the litcite citation engine.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "litcite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to litcite.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite citations in a page and print the result
    Render {
        /// Markdown page to process
        page: PathBuf,

        /// Literature notes directory (overrides config)
        #[arg(long, env = "LITCITE_NOTES")]
        notes: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check citations in a page or directory and report diagnostics
    Check {
        /// Markdown page or directory of pages
        path: PathBuf,

        /// Literature notes directory (overrides config)
        #[arg(long, env = "LITCITE_NOTES")]
        notes: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered pages
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Render {
            page,
            notes,
            output,
        } => commands::render_page(
            cli.config.as_deref(),
            &page,
            notes.as_deref(),
            output.as_deref(),
        ),
        Commands::Check { path, notes, json } => {
            commands::check_pages(cli.config.as_deref(), &path, notes.as_deref(), json)
        }
    }
}
