//! bibliorec - book recommendations from the command line
//!
//! Usage:
//!   bibliorec titles --artifacts ./data                 # List queryable titles
//!   bibliorec recommend --artifacts ./data "The Hobbit"  # Four similar books
//!   bibliorec recommend --artifacts ./data -n 8 --index hnsw --json "Emma"

use bibliorec::index::{IndexKind, Metric};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{recommend, titles};

/// bibliorec - Book Recommendation Tool
///
/// Finds books similar to a selected title by nearest-neighbor search over
/// a user-rating matrix.
#[derive(Parser)]
#[command(name = "bibliorec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every title that can be queried
    Titles {
        /// Directory holding pivot.json and books.json
        #[arg(short, long, value_name = "DIR")]
        artifacts: PathBuf,

        /// Show at most this many titles
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Recommend books similar to TITLE
    Recommend {
        /// Exact title to find neighbors for
        #[arg(value_name = "TITLE")]
        title: String,

        /// Directory holding pivot.json and books.json
        #[arg(short, long, value_name = "DIR")]
        artifacts: PathBuf,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Number of recommendations (default: 4)
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Similarity index: brute or hnsw
        #[arg(long)]
        index: Option<IndexKind>,

        /// Distance metric: euclidean or cosine
        #[arg(long)]
        metric: Option<Metric>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Titles { artifacts, limit } => titles::run(&artifacts, limit, cli.json),

        Commands::Recommend {
            title,
            artifacts,
            config,
            max_results,
            index,
            metric,
        } => {
            let overrides = recommend::Overrides {
                max_results,
                index,
                metric,
            };
            recommend::run(&artifacts, &title, config.as_deref(), &overrides, cli.json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
