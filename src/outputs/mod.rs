//! Output writers for the scraped recipe list.
//!
//! # Submodules
//!
//! - [`json`]: the full nested records, pretty-printed
//! - [`tabular`]: one CSV row per recipe with a fixed set of columns
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── iba_cocktail_recipes.json   # --format json (default)
//! └── iba_cocktail_recipes.csv    # --format csv
//! ```

pub mod json;
pub mod tabular;

use crate::error::Result;
use crate::models::{OutputFormat, Recipe};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Write `recipes` into `output_dir` using the file name fixed by `format`.
///
/// # Arguments
///
/// * `recipes` - The final recipe list
/// * `format` - JSON records or CSV rows
/// * `output_dir` - Target directory, created when missing
///
/// # Returns
///
/// The path of the written file, e.g. `{output_dir}/iba_cocktail_recipes.json`.
#[instrument(level = "info", skip(recipes), fields(count = recipes.len()))]
pub async fn write_recipes(
    recipes: &[Recipe],
    format: OutputFormat,
    output_dir: &Path,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(format.file_name());

    match format {
        OutputFormat::Json => json::write_recipes(recipes, &path).await?,
        OutputFormat::Csv => tabular::write_recipes(recipes, &path).await?,
    }

    info!(path = %path.display(), "Wrote recipes");
    Ok(path)
}
