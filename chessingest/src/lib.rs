pub mod report;
pub mod scheduler;

pub use crate::report::RunReport;
pub use crate::scheduler::{IngestOptions, Scheduler};

use anyhow::Context;
use chesstore::{PostgrestStore, StoreConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Runs the command line interface for the ingestion service.
pub async fn run_cli() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Ingest(args)) => run_ingest(args).await?,
        None => {
            println!("No subcommand provided. Use --help to see available commands.");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ingests a directory of PGN files into the remote store
    Ingest(IngestArgs),
}

#[derive(Args)]
struct IngestArgs {
    /// Directory holding the PGN files to ingest
    #[arg(long, env = "PGN_DIR", default_value = "pgns")]
    dir: PathBuf,
    /// Number of games submitted per insert call
    #[arg(long, default_value_t = 10)]
    batch_size: usize,
    /// Size of the insert worker pool
    #[arg(long, default_value_t = 8)]
    workers: usize,
}

async fn run_ingest(args: IngestArgs) -> anyhow::Result<()> {
    if args.batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }
    if args.workers == 0 {
        anyhow::bail!("--workers must be at least 1");
    }

    let config = StoreConfig::from_env().context("resolving store configuration")?;
    let store = Arc::new(PostgrestStore::new(&config)?);
    let scheduler = Scheduler::new(
        store,
        IngestOptions {
            batch_size: args.batch_size,
            workers: args.workers,
        },
    );

    let report = scheduler.run(&args.dir).await?;
    if !report.is_clean() {
        for failure in &report.file_failures {
            warn!(path = %failure.path.display(), error = %failure.error, "file skipped");
        }
        warn!(
            games_failed = report.games_failed(),
            users_failed = report.users_failed(),
            "run completed with failures; see report for replay keys"
        );
    }
    info!(report = %serde_json::to_string(&report)?, "run report");

    Ok(())
}
