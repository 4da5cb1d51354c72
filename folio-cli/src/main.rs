//! # folio CLI
//!
//! Command-line interface for building and querying the folio search index.

mod commands;
mod payload;

use clap::{Parser, Subcommand};
use folio_core::SearchMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "folio.yml", env = "FOLIO_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the content directory and write the search snapshot
    Build {
        /// Snapshot path (overrides paths.snapshot)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Search the built snapshot
    Search {
        /// Search query
        query: String,

        /// Field to match: all, title, tag, or content (unknown values mean all)
        #[arg(long = "type", value_name = "MODE")]
        mode: Option<String>,

        /// Maximum results to print
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Show a single article by slug
    Show {
        /// Article slug
        slug: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List tags with article counts
    Tags {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Serve the search API
    Serve {
        /// Server port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
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
        Commands::Build { output } => commands::build_index(&cli.config, output),
        Commands::Search {
            query,
            mode,
            limit,
            json,
        } => {
            let opts = commands::SearchOptions {
                mode: SearchMode::from_param(mode.as_deref()),
                limit,
                json,
            };
            commands::search_articles(&cli.config, &query, opts)
        }
        Commands::Show { slug, json } => commands::show_article(&cli.config, &slug, json),
        Commands::Tags { json } => commands::list_tags(&cli.config, json),
        Commands::Serve { port } => commands::serve(&cli.config, port).await,
    }
}
