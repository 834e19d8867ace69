//! Small helpers for the entry point: output directory validation and the
//! human-readable run summary.

use crate::error::Result;
use crate::models::Recipe;
use std::fmt::Write as _;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Create `path` if needed and verify a file can be written into it.
///
/// Called before any request is made.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

/// Multi-line description of one recipe for the terminal.
pub fn recipe_summary(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", recipe.name);
    let _ = writeln!(out, "Category: {}", recipe.category);
    if let Some(views) = &recipe.views {
        let _ = writeln!(out, "Views: {views}");
    }
    let _ = writeln!(out, "URL: {}", recipe.url);
    let _ = writeln!(out, "Ingredients:");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {ingredient}");
    }
    if !recipe.glass.is_empty() {
        let _ = writeln!(out, "Glass: {}", recipe.glass);
    }
    let _ = writeln!(out, "Method: {}", recipe.method);
    let _ = writeln!(out, "Garnish: {}", recipe.garnish);
    let _ = writeln!(out, "Image: {}", recipe.image.as_deref().unwrap_or("-"));
    let _ = write!(out, "Video: {}", recipe.video.as_deref().unwrap_or("-"));
    out
}
