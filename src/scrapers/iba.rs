//! IBA official cocktails scraper.
//!
//! The catalog at `https://iba-world.com/cocktails/all-cocktails/` is
//! paginated as `.../page/{n}/`. Each card links to a detail page under
//! `/iba-cocktail/{slug}/`; the card text mixes the cocktail name with its
//! category and a view counter (`NegroniThe Unforgettables108.9K views`).
//!
//! Pagination stops when a page adds no new links, adds fewer than
//! `min_links_per_page`, or fails to load.

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{
    CatalogEntry, Recipe, CATEGORY_CONTEMPORARY, CATEGORY_NEW_ERA, CATEGORY_UNFORGETTABLES,
};
use crate::page::{HtmlPage, Page, PageNode};
use crate::recipe::extract_recipe;
use crate::text::clean_name;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const LINK_SELECTORS: &[&str] = &[
    r#"a[href*="/iba-cocktail/"]"#,
    r#"a[href*="/cocktail/"]"#,
    ".cocktail-card a",
    ".cocktail-item a",
    r#"[class*="cocktail"] a"#,
];

/// Elements checked for a category keyword, the link itself included.
const CATEGORY_SEARCH_DEPTH: usize = 5;

const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("unforgettable", CATEGORY_UNFORGETTABLES),
    ("contemporary", CATEGORY_CONTEMPORARY),
    ("new era", CATEGORY_NEW_ERA),
];

/// Ways of finding cocktail links on a catalog page, tried in order.
#[derive(Debug, Clone, Copy)]
pub enum LinkStrategy {
    /// Use every match of the first selector that matches anything.
    FirstMatchingSelector(&'static [&'static str]),
    /// Any anchor whose href mentions "cocktail" and whose text looks like
    /// a name.
    AnchorScan,
}

pub const LINK_STRATEGIES: &[LinkStrategy] = &[
    LinkStrategy::FirstMatchingSelector(LINK_SELECTORS),
    LinkStrategy::AnchorScan,
];

impl LinkStrategy {
    /// New entries found by this strategy. URLs already in `seen` are
    /// skipped; accepted URLs are added to it.
    pub fn collect<P: Page>(&self, page: &P, seen: &mut HashSet<String>) -> Vec<CatalogEntry> {
        match self {
            LinkStrategy::FirstMatchingSelector(selectors) => {
                let Some(links) = selectors
                    .iter()
                    .map(|css| page.select(css))
                    .find(|matches| !matches.is_empty())
                else {
                    return Vec::new();
                };
                links
                    .iter()
                    .filter_map(|link| catalog_entry(page, link, seen))
                    .collect()
            }
            LinkStrategy::AnchorScan => page
                .select("a[href]")
                .iter()
                .filter(|link| is_plausible_cocktail_anchor(*link))
                .filter_map(|link| catalog_entry(page, link, seen))
                .collect(),
        }
    }
}

fn is_plausible_cocktail_anchor<N: PageNode>(link: &N) -> bool {
    let Some(href) = link.attr("href") else {
        return false;
    };
    let text_len = link.stripped_text().chars().count();
    href.to_lowercase().contains("cocktail") && text_len > 2 && text_len < 100
}

/// Category of a catalog link, judged from the text of the link and its
/// nearest ancestors. Empty when no keyword appears.
pub fn infer_category<'a, P: Page>(page: &'a P, link: &P::Node<'a>) -> String {
    let ancestors = page.ancestors(link);
    let texts = std::iter::once(link.raw_text()).chain(
        ancestors
            .iter()
            .take(CATEGORY_SEARCH_DEPTH - 1)
            .map(|node| node.raw_text()),
    );

    for text in texts {
        let lower = text.to_lowercase();
        if let Some((_, category)) = CATEGORY_KEYWORDS.iter().find(|(kw, _)| lower.contains(kw)) {
            return category.to_string();
        }
    }
    String::new()
}

fn catalog_entry<'a, P: Page>(
    page: &'a P,
    link: &P::Node<'a>,
    seen: &mut HashSet<String>,
) -> Option<CatalogEntry> {
    let href = link.attr("href").filter(|h| !h.trim().is_empty())?;
    let url = page.resolve(href)?;
    if seen.contains(&url) {
        return None;
    }

    let (name, views) = clean_name(&link.stripped_text());
    let name = name?;
    let category = infer_category(page, link);

    seen.insert(url.clone());
    Some(CatalogEntry {
        name,
        url,
        category,
        views,
    })
}

/// New cocktail links on one catalog page: the first strategy in
/// [`LINK_STRATEGIES`] that yields anything wins.
pub fn collect_page_links<P: Page>(page: &P, seen: &mut HashSet<String>) -> Vec<CatalogEntry> {
    LINK_STRATEGIES
        .iter()
        .map(|strategy| strategy.collect(page, seen))
        .find(|entries| !entries.is_empty())
        .unwrap_or_default()
}

/// Paginate the catalog and collect every cocktail link.
///
/// Pages are requested one at a time with `page_delay_ms` between them.
///
/// # Arguments
///
/// * `fetcher` - HTTP access used for every catalog page
/// * `config` - Catalog URL, base URL, delay and short-page threshold
///
/// # Returns
///
/// Every [`CatalogEntry`] found, in page order and unique by URL. A failed
/// request ends pagination and whatever was collected so far is returned.
///
/// # Errors
///
/// Only an unparseable `base_url`.
#[instrument(level = "info", skip_all, fields(catalog = %config.catalog_url))]
pub async fn index_cocktails<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Result<Vec<CatalogEntry>> {
    let base_url = Url::parse(&config.base_url)?;
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut page_number = 1;

    loop {
        let page_url = config.catalog_page_url(page_number);
        info!(page = page_number, url = %page_url, "Scraping catalog page");

        let html = match fetcher.fetch_text(&page_url).await {
            Ok(html) => html,
            Err(e) => {
                error!(page = page_number, error = %e, "Error fetching catalog page");
                break;
            }
        };

        let found = {
            let page = HtmlPage::parse(&html, base_url.clone());
            collect_page_links(&page, &mut seen)
        };

        if found.is_empty() {
            info!(page = page_number, "No new cocktails found; stopping");
            break;
        }

        let found_count = found.len();
        info!(page = page_number, count = found_count, "Found cocktails on page");
        debug!(names = ?found.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), "Catalog entries");
        entries.extend(found);
        page_number += 1;

        sleep(config.page_delay()).await;

        if found_count < config.min_links_per_page {
            info!(count = found_count, "Short catalog page; assuming last page");
            break;
        }
    }

    info!(count = entries.len(), "Indexed cocktail links");
    Ok(entries)
}

/// Fetch and extract a single recipe.
#[instrument(level = "info", skip_all, fields(url = %entry.url))]
pub async fn fetch_recipe<F: Fetch>(fetcher: &F, base_url: &Url, entry: &CatalogEntry) -> Result<Recipe> {
    let html = fetcher.fetch_text(&entry.url).await?;
    let page = HtmlPage::parse(&html, base_url.clone());
    let recipe = extract_recipe(&page, &entry.url, &entry.name).with_catalog_entry(entry);

    if recipe.ingredients.is_empty() {
        warn!(name = %entry.name, "No ingredients found");
    }
    Ok(recipe)
}

/// Fetch every recipe in order, pausing between requests.
///
/// # Arguments
///
/// * `fetcher` - HTTP access used for every detail page
/// * `config` - Base URL and `recipe_delay_ms`
/// * `entries` - Catalog entries to visit, usually from [`index_cocktails`]
///
/// # Returns
///
/// The recipes that could be fetched, in catalog order. Failed fetches are
/// logged and skipped without failing the batch.
#[instrument(level = "info", skip_all, fields(count = entries.len()))]
pub async fn fetch_recipes<F: Fetch>(
    fetcher: &F,
    config: &ScraperConfig,
    entries: &[CatalogEntry],
) -> Result<Vec<Recipe>> {
    let base_url = Url::parse(&config.base_url)?;
    let total = entries.len();

    let recipes: Vec<Recipe> = stream::iter(entries.iter().enumerate())
        .then(|(i, entry)| {
            let base_url = &base_url;
            async move {
                info!(index = i + 1, total, name = %entry.name, "Scraping recipe");
                let result = match fetch_recipe(fetcher, base_url, entry).await {
                    Ok(recipe) => {
                        info!(name = %entry.name, "Successfully scraped");
                        Some(recipe)
                    }
                    Err(e) => {
                        error!(name = %entry.name, url = %entry.url, error = %e, "Failed to scrape");
                        None
                    }
                };
                sleep(config.recipe_delay()).await;
                result
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(successful = recipes.len(), total, "Fetched recipes");
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const BASE: &str = "https://iba-world.com";

    /// In-memory site: unknown URLs fail like a 404.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeSite {
        fn with_page(mut self, url: &str, html: String) -> Self {
            self.pages.insert(url.to_string(), html);
            self
        }
    }

    impl Fetch for FakeSite {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| {
                ScrapeError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, url.to_string()))
            })
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.fetch_text(url).await.map(String::into_bytes)
        }
    }

    fn quiet_config() -> ScraperConfig {
        ScraperConfig {
            page_delay_ms: 0,
            recipe_delay_ms: 0,
            ..Default::default()
        }
    }

    fn html_page(html: &str) -> HtmlPage {
        HtmlPage::parse(html, Url::parse(BASE).unwrap())
    }

    fn catalog(slugs: &[&str]) -> String {
        let cards: String = slugs
            .iter()
            .map(|slug| {
                format!(
                    r#"<div class="cocktail-card"><a href="/iba-cocktail/{slug}/">{slug}<span>1.5K views</span></a></div>"#
                )
            })
            .collect();
        format!("<html><body><main>{cards}</main></body></html>")
    }

    fn page_url(n: usize) -> String {
        ScraperConfig::default().catalog_page_url(n)
    }

    #[test]
    fn test_collect_page_links_with_categories() {
        let page = html_page(
            r#"<body>
            <section><h2>The Unforgettables</h2>
              <div class="card"><a href="/iba-cocktail/negroni/">Negroni<span>108.9K views</span></a></div>
              <div class="card"><a href="https://iba-world.com/iba-cocktail/alexander/">Alexander</a></div>
            </section>
            <section><h2>Contemporary Classics</h2>
              <div class="card"><a href="/iba-cocktail/bellini/">Bellini<span>52K views</span></a></div>
              <div class="card"><a href="/iba-cocktail/negroni/">Negroni again</a></div>
            </section>
            <a href="/about/">About</a>
            </body>"#,
        );

        let mut seen = HashSet::new();
        let entries = collect_page_links(&page, &mut seen);
        assert_eq!(
            entries,
            vec![
                CatalogEntry {
                    name: "Negroni".into(),
                    url: "https://iba-world.com/iba-cocktail/negroni/".into(),
                    category: "The Unforgettables".into(),
                    views: Some("108.9K".into()),
                },
                CatalogEntry {
                    name: "Alexander".into(),
                    url: "https://iba-world.com/iba-cocktail/alexander/".into(),
                    category: "The Unforgettables".into(),
                    views: None,
                },
                CatalogEntry {
                    name: "Bellini".into(),
                    url: "https://iba-world.com/iba-cocktail/bellini/".into(),
                    category: "Contemporary Classics".into(),
                    views: Some("52K".into()),
                },
            ]
        );
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_anchor_scan_fallback() {
        let page = html_page(
            r#"<body><ul>
                <li><a href="/drinks/cocktail-spritz">Spritz</a></li>
                <li><a href="/drinks/cocktail-x">X</a></li>
                <li><a href="/contact">Contact us</a></li>
                <li><a href="/drinks/cocktail-paloma">Paloma</a></li>
            </ul></body>"#,
        );
        let mut seen = HashSet::new();
        let names: Vec<_> = collect_page_links(&page, &mut seen)
            .into_iter()
            .map(|e| (e.name, e.url))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Spritz".to_string(), "https://iba-world.com/drinks/cocktail-spritz".to_string()),
                ("Paloma".to_string(), "https://iba-world.com/drinks/cocktail-paloma".to_string()),
            ]
        );
    }

    #[test]
    fn test_infer_category_new_era_on_link() {
        let page = html_page(r#"<div><a href="/iba-cocktail/spritz/">SpritzNew Era Drinks</a></div>"#);
        let link = page.select("a").remove(0);
        assert_eq!(infer_category(&page, &link), "New Era");

        let plain = html_page(r#"<div><a href="/iba-cocktail/spritz/">Spritz</a></div>"#);
        let link = plain.select("a").remove(0);
        assert_eq!(infer_category(&plain, &link), "");
    }

    fn nested_link(div_count: usize) -> String {
        let open = "<div>".repeat(div_count);
        let close = "</div>".repeat(div_count);
        format!(
            r#"<body><section><h2>The Unforgettables</h2>{open}<a href="/iba-cocktail/negroni/">Negroni</a>{close}</section></body>"#
        )
    }

    #[test]
    fn test_infer_category_stops_after_four_ancestors() {
        let within = html_page(&nested_link(3));
        let link = within.select("a").remove(0);
        assert_eq!(infer_category(&within, &link), "The Unforgettables");

        let beyond = html_page(&nested_link(4));
        let link = beyond.select("a").remove(0);
        assert_eq!(infer_category(&beyond, &link), "");
    }

    #[tokio::test]
    async fn test_index_stops_after_short_page_and_dedupes() {
        let site = FakeSite::default()
            .with_page(
                &page_url(1),
                catalog(&["negroni", "americano", "alexander", "bellini", "daiquiri", "mojito"]),
            )
            .with_page(&page_url(2), catalog(&["mojito", "paloma", "spritz"]))
            .with_page(&page_url(3), catalog(&["sidecar", "gimlet", "zombie", "sazerac", "martinez"]));

        let entries = index_cocktails(&site, &quiet_config()).await.unwrap();
        assert_eq!(entries.len(), 8);

        let unique: HashSet<_> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(unique.len(), entries.len());
        assert_eq!(entries[0].views.as_deref(), Some("1.5K"));
        assert_eq!(*site.requested.borrow(), vec![page_url(1), page_url(2)]);
    }

    #[tokio::test]
    async fn test_index_keeps_entries_when_a_page_fails() {
        let site = FakeSite::default().with_page(
            &page_url(1),
            catalog(&["negroni", "americano", "alexander", "bellini", "daiquiri"]),
        );

        let entries = index_cocktails(&site, &quiet_config()).await.unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(site.requested.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_index_stops_when_page_has_only_duplicates() {
        let first = catalog(&["negroni", "americano", "alexander", "bellini", "daiquiri"]);
        let site = FakeSite::default()
            .with_page(&page_url(1), first.clone())
            .with_page(&page_url(2), first);

        let entries = index_cocktails(&site, &quiet_config()).await.unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(site.requested.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_index_empty_when_first_page_fails() {
        let site = FakeSite::default();
        let entries = index_cocktails(&site, &quiet_config()).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_recipes_skips_failures() {
        let detail = r#"<html><body>
<h4>Ingredients</h4>
<p>45 ml White Rum</p>
<p>20 ml Lime Juice</p>
<h4>Method</h4>
<p>Shake and strain.</p>
</body></html>"#;
        let site = FakeSite::default()
            .with_page("https://iba-world.com/iba-cocktail/daiquiri/", detail.to_string());

        let entries = vec![
            CatalogEntry {
                name: "Daiquiri".into(),
                url: "https://iba-world.com/iba-cocktail/daiquiri/".into(),
                category: "The Unforgettables".into(),
                views: Some("80K".into()),
            },
            CatalogEntry {
                name: "Ghost".into(),
                url: "https://iba-world.com/iba-cocktail/ghost/".into(),
                category: String::new(),
                views: None,
            },
        ];

        let recipes = fetch_recipes(&site, &quiet_config(), &entries).await.unwrap();
        assert_eq!(recipes.len(), 1);
        let daiquiri = &recipes[0];
        assert_eq!(daiquiri.name, "Daiquiri");
        assert_eq!(daiquiri.category, "The Unforgettables");
        assert_eq!(daiquiri.views.as_deref(), Some("80K"));
        assert_eq!(daiquiri.ingredients, vec!["45 ml White Rum", "20 ml Lime Juice"]);
        assert_eq!(daiquiri.method, "Shake and strain.");
        assert_eq!(site.requested.borrow().len(), 2);
    }
}
