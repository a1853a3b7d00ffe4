//! Shelf-Harvest main entry point
//!
//! Command-line interface for the catalog harvester.

use clap::Parser;
use shelf_harvest::config::load_config_with_hash;
use shelf_harvest::dataset::{load_snapshot, CatalogStore};
use shelf_harvest::job::CrawlJob;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Shelf-Harvest: a catalog snapshot harvester
///
/// Crawls a paginated book catalog into a CSV snapshot: discovers the page
/// count, fetches every listing page, enriches each book with its category
/// from the detail page, and writes the result atomically.
#[derive(Parser, Debug)]
#[command(name = "shelf-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A catalog snapshot harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show aggregates from the existing snapshot and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        Ok(())
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_harvest(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_harvest=info,warn"),
            1 => EnvFilter::new("shelf_harvest=debug,info"),
            2 => EnvFilter::new("shelf_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &shelf_harvest::Config, config_hash: &str) {
    println!("=== Shelf-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nCrawler:");
    println!(
        "  Listing concurrency: {}",
        config.crawler.listing_concurrency
    );
    println!(
        "  Detail concurrency: {}",
        config.crawler.detail_concurrency
    );
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Job deadline: {}s", config.crawler.job_deadline_secs);

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nOutput:");
    println!("  Snapshot: {}", config.output.snapshot_path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
}

/// Handles the --stats mode: loads the snapshot and prints aggregates
fn handle_stats(config: &shelf_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Snapshot: {}\n", config.output.snapshot_path);

    let records = load_snapshot(std::path::Path::new(&config.output.snapshot_path))?;
    let store = CatalogStore::new();
    store.swap(records);

    let stats = store.stats();
    println!("Total books: {}", stats.total);
    println!("Average price: {:.2}", stats.average_price);
    println!("Rating distribution:");
    for (rating, count) in stats.rating_distribution.iter().enumerate() {
        println!("  {} star(s): {}", rating + 1, count);
    }

    let categories = store.categories();
    println!("Categories ({}):", categories.len());
    for category in categories {
        println!("  - {}", category);
    }

    Ok(())
}

/// Handles the default mode: runs one harvest to completion
async fn handle_harvest(config: shelf_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = CatalogStore::new();
    let job = CrawlJob::new(config, store.clone())?;

    job.trigger()?;
    tracing::info!("Harvest scheduled, waiting for completion");

    while job.status().running {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    let status = job.status();
    if let Some(error) = status.last_error {
        tracing::error!("Harvest failed: {}", error);
        return Err(error.into());
    }

    tracing::info!(
        "Harvest completed: {} book(s) now served from {}",
        store.len(),
        status.last_success_path.as_deref().unwrap_or("<none>")
    );
    Ok(())
}
