//! `jisilu` — crawl convertible-bond detail pages into JSON/CSV exports.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use jisilu_crawler::{Crawler, CrawlerConfig, FetchMode};

/// Fetch jisilu.cn convertible-bond detail pages and export the extracted
/// fields as per-bond JSON/CSV plus one aggregate CSV.
#[derive(Debug, Parser)]
#[command(name = "jisilu", version, about)]
struct Args {
    /// Bond codes to crawl, e.g. 113046 113566
    #[arg(required = true)]
    codes: Vec<String>,

    /// Directory receiving all exported files
    #[arg(short, long, default_value = "./data")]
    output: PathBuf,

    /// Re-read cached `{code}_debug.html` pages instead of the network
    #[arg(long)]
    local: bool,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = CrawlerConfig {
        output_dir: args.output,
        mode: if args.local {
            FetchMode::Local
        } else {
            FetchMode::Network
        },
        ..CrawlerConfig::default()
    };

    let crawler = Crawler::new(&config)?;
    info!(codes = args.codes.len(), mode = ?config.mode, "starting crawl");

    let records = crawler.crawl(&args.codes).await;

    if records.is_empty() {
        info!("no bonds were successfully processed");
        return Ok(());
    }

    // A failed aggregate write is reported but never changes the exit
    // status; the per-bond files are already on disk.
    match crawler.save_aggregate(&records) {
        Ok(path) => info!(path = %path.display(), "aggregate export written"),
        Err(e) => error!("aggregate export failed: {e}"),
    }

    info!("crawl complete");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "jisilu_crawler=debug,jisilu=debug"
    } else {
        "jisilu_crawler=info,jisilu=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
