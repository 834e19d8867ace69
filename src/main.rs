//! # IBA Cocktail Scraper
//!
//! Collects the official cocktail recipes published by the International
//! Bartenders Association at iba-world.com and writes them to a JSON or CSV
//! file, optionally downloading each cocktail's image and preparation video.
//!
//! ## Usage
//!
//! ```sh
//! iba_cocktail_scraper --format csv --output-dir ./out
//! ```
//!
//! ## Architecture
//!
//! The run is a sequential pipeline:
//! 1. **Indexing**: paginate the catalog and collect cocktail links
//! 2. **Fetching**: extract a recipe from each detail page
//! 3. **Media** (optional): download images and videos
//! 4. **Output**: write the recipe list in the chosen format

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod fetch;
mod locate;
mod media;
mod models;
mod outputs;
mod page;
mod recipe;
mod scrapers;
mod text;
mod utils;

use cli::Cli;
use config::ScraperConfig;
use fetch::HttpFetcher;
use media::{MediaDownloader, YtDlp};
use utils::{ensure_writable_dir, recipe_summary};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("iba_cocktail_scraper starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Load config ----
    let config = match &args.config {
        Some(path) => ScraperConfig::from_yaml_file(path)?,
        None => ScraperConfig::default(),
    };
    info!(catalog = %config.catalog_url, user_agent = %config.user_agent, "Loaded configuration");

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let fetcher = HttpFetcher::new(&config)?;

    // ---- Index catalog ----
    let mut entries = scrapers::iba::index_cocktails(&fetcher, &config).await?;
    if entries.is_empty() {
        println!("No cocktails found in the catalog.");
        info!("Nothing to scrape; exiting");
        return Ok(());
    }
    if let Some(max) = args.max_cocktails {
        entries.truncate(max);
        info!(max, "Limiting cocktails");
    }
    let total_indexed = entries.len();

    // ---- Fetch recipes ----
    let mut recipes = scrapers::iba::fetch_recipes(&fetcher, &config, &entries).await?;
    let failed_count = total_indexed - recipes.len();
    info!(
        total = total_indexed,
        successful = recipes.len(),
        failed = failed_count,
        "Completed recipe scraping"
    );

    // ---- Media ----
    if args.download_media {
        let downloader = MediaDownloader::new(&fetcher, YtDlp::from_config(&config), &config);
        recipes = downloader.download_all(recipes).await?;
    }

    // ---- Output ----
    let path = outputs::write_recipes(&recipes, args.format, &args.output_dir).await?;

    match recipes.first() {
        Some(first) => {
            println!("Scraped {} of {} cocktails.", recipes.len(), total_indexed);
            println!("Saved to {}", path.display());
            println!();
            println!("{}", recipe_summary(first));
        }
        None => println!("No recipes could be scraped; wrote an empty {}", path.display()),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
