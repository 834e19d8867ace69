//! Record output: the whole recipe list as one JSON array.
//!
//! Two-space indentation, non-ASCII characters written as-is. Fields that
//! were never filled (`local_image`, `local_video`, an empty `glass`) are
//! left out of each record.

use crate::error::Result;
use crate::models::Recipe;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_recipes(recipes: &[Recipe], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(recipes)?;
    fs::write(path, json).await?;
    info!(count = recipes.len(), "Wrote JSON recipes");
    Ok(())
}
