//! Tabular output: one CSV row per recipe.
//!
//! Columns are fixed: `name, category, url, ingredients, method,
//! preparation, glass, garnish`. Ingredients are joined with `" | "`; media
//! fields are not part of the table. The header comes from the first row,
//! so an empty list yields an empty file.

use crate::error::Result;
use crate::models::Recipe;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const INGREDIENT_SEPARATOR: &str = " | ";

#[derive(Debug, Serialize)]
struct RecipeRow<'a> {
    name: &'a str,
    category: &'a str,
    url: &'a str,
    ingredients: String,
    method: &'a str,
    preparation: &'a str,
    glass: &'a str,
    garnish: &'a str,
}

impl<'a> From<&'a Recipe> for RecipeRow<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            name: &recipe.name,
            category: &recipe.category,
            url: &recipe.url,
            ingredients: recipe.ingredients.join(INGREDIENT_SEPARATOR),
            method: &recipe.method,
            preparation: &recipe.preparation,
            glass: &recipe.glass,
            garnish: &recipe.garnish,
        }
    }
}

/// Render `recipes` as CSV text.
pub fn to_csv(recipes: &[Recipe]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for recipe in recipes {
        writer.serialize(RecipeRow::from(recipe))?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_recipes(recipes: &[Recipe], path: &Path) -> Result<()> {
    let csv = to_csv(recipes)?;
    fs::write(path, csv).await?;
    info!(count = recipes.len(), "Wrote CSV recipes");
    Ok(())
}
