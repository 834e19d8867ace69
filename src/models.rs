//! Data models for catalog entries and scraped recipes.
//!
//! - [`CatalogEntry`]: a cocktail link discovered on the catalog page
//! - [`Recipe`]: the structured recipe extracted from a detail page, later
//!   enriched with local media paths
//! - [`OutputFormat`]: record (JSON) or tabular (CSV) output

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Category labels inferred from the catalog page.
pub const CATEGORY_UNFORGETTABLES: &str = "The Unforgettables";
pub const CATEGORY_CONTEMPORARY: &str = "Contemporary Classics";
pub const CATEGORY_NEW_ERA: &str = "New Era";

/// A cocktail link discovered while paginating the catalog.
///
/// `url` is absolute and unique across one collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
    /// One of the `CATEGORY_*` labels, or empty when none was found.
    pub category: String,
    /// View count as displayed on the site, e.g. `"108.9K"`.
    pub views: Option<String>,
}

/// A recipe scraped from a cocktail detail page.
///
/// Serialized field order matches the record output. `local_image` and
/// `local_video` only appear once media has been downloaded; `preparation`
/// and `glass` only when the page had those sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub url: String,
    pub name: String,
    pub category: String,
    pub views: Option<String>,
    pub ingredients: Vec<String>,
    /// Newline-joined steps with no blank lines.
    pub method: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub preparation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub glass: String,
    pub garnish: String,
    pub image: Option<String>,
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_video: Option<String>,
}

impl Recipe {
    /// Copy catalog metadata (category, views) onto the recipe.
    pub fn with_catalog_entry(mut self, entry: &CatalogEntry) -> Self {
        self.category = entry.category.clone();
        self.views = entry.views.clone();
        self
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full nested records as one JSON document.
    #[default]
    Json,
    /// One CSV row per recipe.
    Csv,
}

impl OutputFormat {
    /// Fixed output filename for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "iba_cocktail_recipes.json",
            OutputFormat::Csv => "iba_cocktail_recipes.csv",
        }
    }
}
