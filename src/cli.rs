//! Command-line interface definitions for the IBA cocktail scraper.
//!
//! With no flags the scraper walks the whole catalog, writes JSON into the
//! working directory and leaves media alone. Site-level knobs (URLs, delays,
//! media directories) live in the YAML config instead of flags.

use crate::models::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the IBA cocktail scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape everything into ./iba_cocktail_recipes.json
/// iba_cocktail_scraper
///
/// # First ten cocktails as CSV, with images and videos
/// iba_cocktail_scraper --format csv --max-cocktails 10 --download-media
///
/// # Custom delays and user agent
/// iba_cocktail_scraper -c scraper.yaml -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "IBA_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Stop after this many catalog entries
    #[arg(short, long)]
    pub max_cocktails: Option<usize>,

    /// Download each recipe's image and video after scraping
    #[arg(long)]
    pub download_media: bool,
}
