//! Job board crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobs_crawler::{
    error::Result,
    models::{Config, RunInput},
    pipeline,
    services::AshbyClient,
    storage::{JobSink, LocalStorage},
};

/// jobs-crawler - Hosted job board crawler
#[derive(Parser, Debug)]
#[command(name = "jobs-crawler", version, about = "Hosted job board crawler")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect postings from all configured boards
    Scrape {
        /// JSON input file listing board URLs (`{"urls": [...]}`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Board URL to crawl (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,

        /// Output directory (default: output.dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and board URLs
    Validate {
        /// JSON input file listing board URLs
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Board URL to check (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,
    },

    /// Show information about the last written dataset
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Merge the input file and `--url` arguments.
fn load_input(path: Option<&PathBuf>, urls: Vec<String>) -> Result<RunInput> {
    let mut input = match path {
        Some(path) => {
            let input = RunInput::load(path)?;
            log::info!("Loaded {} board(s) from {}", input.urls.len(), path.display());
            input
        }
        None => RunInput::default(),
    };
    input.extend_urls(urls);
    Ok(input)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("jobs-crawler starting...");

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Scrape {
            input,
            urls,
            output,
        } => {
            config.validate()?;
            let requests = load_input(input.as_ref(), urls)?.into_requests()?;

            let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let storage = LocalStorage::new(&output_dir).with_pretty(config.output.pretty);
            let client = AshbyClient::new(&config.client)?;

            pipeline::run_scraper(&config, &client, &storage, &requests).await?;
        }

        Command::Validate { input, urls } => {
            let requests = load_input(input.as_ref(), urls)?.into_requests()?;
            if let Err(e) = pipeline::run_validate(&config, &requests) {
                log::error!("Validation failed: {}", e);
                return Err(e);
            }
            log::info!("All validations passed!");
        }

        Command::Info => {
            let storage = LocalStorage::new(&config.output.dir);
            log::info!("Output directory: {}", storage.root_dir().display());

            match storage.load_dataset().await? {
                Some(dataset) => {
                    log::info!("Jobs in dataset: {}", dataset.count);
                    log::info!("Last updated: {}", dataset.updated_at);
                }
                None => log::info!("No dataset found yet."),
            }

            if let Some(summary) = storage.load_summary().await? {
                log::info!(
                    "Last run: {} board(s), {} completed, {} empty, {} skipped, {} posting failure(s)",
                    summary.board_total(),
                    summary.boards_completed(),
                    summary.boards_empty(),
                    summary.boards_skipped(),
                    summary.postings_failed()
                );
            }

            let jobs = storage.load_jobs().await?;
            for job in jobs.iter().take(5) {
                log::info!("    {} | {} | {}", job.company_name, job.title, job.posting_url);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
