//! Site scrapers.
//!
//! A scraper follows the same two-phase pattern as the rest of the pipeline:
//!
//! 1. **Indexing**: paginate the catalog and collect [`CatalogEntry`] links
//! 2. **Fetching**: visit each detail page and extract a [`Recipe`]
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | IBA Official Cocktails | [`iba`] | HTML scraping | Paginated catalog at `/cocktails/all-cocktails/` |
//!
//! Failed pages are logged and skipped; nothing here retries.
//!
//! [`CatalogEntry`]: crate::models::CatalogEntry
//! [`Recipe`]: crate::models::Recipe

pub mod iba;
