//! Kumo main entry point
//!
//! Command-line driver: loads the TOML configuration, seeds the crawl queue
//! with the configured source URL, and loops one crawl step at a time until
//! the queue drains or the page budget is spent.

use clap::Parser;
use kumo::config::{load_config_with_hash, Config};
use kumo::crawler::{CrawlOutcome, Crawler, HttpFetcher, SiteScope};
use kumo::index::{Index, PersistentIndex};
use kumo::store::{MemoryStore, SqliteStore, Store};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Kumo: a wiki-style crawler with a persistent inverted index
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version)]
#[command(about = "Breadth-first crawler feeding a term -> URL inverted index", long_about = None)]
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

    /// Delete everything in the store before doing anything else
    #[arg(long)]
    wipe: bool,

    /// Print URL -> count for a term and exit without crawling
    #[arg(long, value_name = "TERM")]
    query: Option<String>,

    /// Print the whole index and exit without crawling
    #[arg(long, conflicts_with = "query")]
    dump: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    let database_path = config.store.database_path.clone();
    match database_path {
        Some(path) => {
            tracing::info!("Using SQLite store at {}", path);
            run(SqliteStore::open(Path::new(&path))?, config, &cli).await
        }
        None => {
            tracing::info!("Using in-memory store (state is lost on exit)");
            run(MemoryStore::new(), config, &cli).await
        }
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Runs the selected mode against the given store backend
async fn run<S: Store>(store: S, config: Config, cli: &Cli) -> anyhow::Result<()> {
    let mut index = PersistentIndex::new(store);

    if cli.wipe {
        index.delete_all()?;
        tracing::info!("Store wiped");
    }

    if let Some(term) = &cli.query {
        print_term(&index, term)?;
        return Ok(());
    }

    if cli.dump {
        dump_index(&index)?;
        return Ok(());
    }

    crawl_loop(index, &config).await
}

/// Seeds the queue and processes pages until the budget is spent
async fn crawl_loop<S: Store>(
    index: PersistentIndex<S>,
    config: &Config,
) -> anyhow::Result<()> {
    let seed_url = config.crawl.seed_url.clone();
    let scope = SiteScope::from_seed(&seed_url, config.crawl.link_prefix.clone())?;
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let mut crawler = Crawler::new(seed_url, fetcher, index, scope);

    let mut indexed = 0u32;
    let mut skipped = 0u32;
    let mut failed = 0u32;

    while indexed < config.crawl.max_pages && crawler.queue_size() > 0 {
        match crawler.crawl(false).await {
            Ok(CrawlOutcome::Indexed(_)) => indexed += 1,
            Ok(CrawlOutcome::Skipped(_)) => skipped += 1,
            Ok(CrawlOutcome::Exhausted) => break,
            Err(e) => {
                // the failed URL is dropped; keep going with the rest of the queue
                failed += 1;
                tracing::warn!("Crawl step failed: {}", e);
            }
        }
    }

    tracing::info!(
        indexed,
        skipped,
        failed,
        pending = crawler.queue_size(),
        "Crawl finished"
    );
    Ok(())
}

/// Prints URL -> count pairs for one term
fn print_term<S: Store>(index: &PersistentIndex<S>, term: &str) -> anyhow::Result<()> {
    let counts = index.counts_for_term(term)?;
    if counts.is_empty() {
        println!("no pages contain '{term}'");
        return Ok(());
    }

    println!("{term}");
    for (url, count) in counts {
        println!("    {url} {count}");
    }
    Ok(())
}

/// Prints the entire index, term by term
fn dump_index<S: Store>(index: &PersistentIndex<S>) -> anyhow::Result<()> {
    let mut terms: Vec<String> = index.terms()?.into_iter().collect();
    terms.sort();

    for term in terms {
        println!("{term}");
        for (url, count) in index.counts_for_term(&term)? {
            println!("    {url} {count}");
        }
    }
    Ok(())
}
