use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use colsplit::commands::{print_split_report, split_by_column, ColOptions};
use colsplit::SplitError;

/// colsplit - split a CSV file into several files by the values of one column
#[derive(Parser)]
#[command(name = "colsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a CSV file by column value
    Col {
        /// Input CSV file
        file: PathBuf,

        /// Split by the given column (1-based, default 1)
        #[arg(short, long)]
        column: Option<usize>,

        /// Minimum number of lines per output file (default 1)
        #[arg(short, long)]
        line: Option<usize>,

        /// Process groups by ascending row count
        #[arg(short, long)]
        sort: bool,

        /// Treat the first row as a title and include it in every output file
        #[arg(short, long)]
        tile: bool,

        /// Show the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A valid RUST_LOG wins over --verbose
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Col {
            file,
            column,
            line,
            sort,
            tile,
            dry_run,
            json,
        } => {
            let options = ColOptions {
                column,
                line,
                sort,
                tile,
                dry_run,
            };
            std::env::current_dir()
                .map_err(SplitError::from)
                .and_then(|config_dir| split_by_column(&config_dir, &file, options))
                .and_then(|report| print_split_report(&report, json))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.display_with_hint());
        std::process::exit(1);
    }
}
