//! `sift`: keep a full-text index of a directory tree up to date and search it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::Workspace;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Index a file tree and search it")]
#[command(version)]
struct Cli {
    /// Index root
    #[arg(long, global = true, env = "SIFT_PATH", default_value = ".")]
    path: PathBuf,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty index in <path>/.siftindex
    Init,

    /// Show files that changed since the last update
    Status,

    /// Bring the index in line with the file tree
    Update {
        /// Delete documents of files that no longer exist
        #[arg(long)]
        delete_missing: bool,
    },

    /// Search the index
    #[command(visible_alias = "q")]
    Query {
        /// Search query terms
        #[arg(required = true, value_name = "TERM")]
        terms: Vec<String>,

        /// Maximum results
        #[arg(short = 'n', long, env = "SIFT_QUERY_LIMIT")]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ws = Workspace::open(&cli.path).await?;
    log::debug!("Index root: {}", ws.indexer.layout().root().display());

    match cli.command {
        Commands::Init => commands::init(&ws).await,
        Commands::Status => commands::status(&ws).await,
        Commands::Update { delete_missing } => commands::update(&ws, delete_missing).await,
        Commands::Query { terms, limit, json } => commands::query(&ws, &terms, limit, json),
    }
}
