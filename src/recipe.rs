//! Recipe extraction from a cocktail detail page.
//!
//! Sections are cut out of the page's flattened visible text by heading:
//!
//! | Field        | Starts after              | Ends at                                           |
//! |--------------|---------------------------|---------------------------------------------------|
//! | ingredients  | `Ingredients` + newline   | first `Method`/`Preparation`/`Glass`/`Garnish`    |
//! | method       | `Method` + newline        | newline followed by `Garnish`                     |
//! | preparation  | `Preparation` + newline   | newline followed by `Garnish`                     |
//! | garnish      | `Garnish` (`:` optional)  | first blank line                                  |
//!
//! All matching is case-insensitive. When the text yields no ingredients,
//! `li`/`p` elements carrying a measurement unit are used instead.

use crate::locate::{find_image, find_video};
use crate::models::Recipe;
use crate::page::{Page, PageNode};
use crate::text::normalize_steps;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

static INGREDIENTS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ingredients\s*\n").expect("valid regex"));
static INGREDIENTS_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)method|preparation|glass|garnish").expect("valid regex"));
static METHOD_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)method\s*\n").expect("valid regex"));
static PREPARATION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)preparation\s*\n").expect("valid regex"));
static STEPS_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\n\s*garnish").expect("valid regex"));
static GARNISH_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)garnish[:\s]*\n?").expect("valid regex"));
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n").expect("valid regex"));
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*]\s*").expect("valid regex"));

const SECTION_HEADINGS: &[&str] = &["method", "preparation", "glass", "garnish"];
const STEP_NOISE_PREFIXES: &[&str] = &["glass", "garnish"];
const UNIT_TOKENS: &[&str] = &["ml", "cl", "oz", "dash", "tsp", "tbsp"];

/// Fields recovered from the visible text of a detail page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeSections {
    pub ingredients: Vec<String>,
    pub method: String,
    pub preparation: String,
    pub garnish: String,
    pub glass: String,
}

/// Text between the first `heading` match and the first `end` match after
/// it, or the end of the text.
fn section<'t>(text: &'t str, heading: &Regex, end: &Regex) -> Option<&'t str> {
    let start = heading.find(text)?.end();
    let rest = &text[start..];
    let stop = end.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..stop])
}

fn starts_with_any(line: &str, prefixes: &[&str]) -> bool {
    let lower = line.to_lowercase();
    prefixes.iter().any(|p| lower.starts_with(p))
}

fn parse_ingredients(text: &str) -> Vec<String> {
    let Some(block) = section(text, &INGREDIENTS_HEADING, &INGREDIENTS_END) else {
        return Vec::new();
    };
    block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !starts_with_any(line, SECTION_HEADINGS))
        .map(|line| BULLET_PREFIX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn parse_steps(text: &str, heading: &Regex) -> String {
    let Some(block) = section(text, heading, &STEPS_END) else {
        return String::new();
    };
    let kept = block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !starts_with_any(line, STEP_NOISE_PREFIXES))
        .join("\n");
    normalize_steps(&kept)
}

fn parse_garnish(text: &str) -> String {
    section(text, &GARNISH_HEADING, &BLANK_LINE)
        .map(|g| g.trim().to_string())
        .unwrap_or_default()
}

/// The serving glass: the line after a standalone `Glass` heading, or the
/// remainder of a `Glass: ...` line.
fn parse_glass(text: &str) -> String {
    let mut lines = text.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line.eq_ignore_ascii_case("glass") || line.eq_ignore_ascii_case("glass:") {
            return lines.find(|l| !l.is_empty()).unwrap_or_default().to_string();
        }
        let prefix = "glass:".len();
        if line.get(..prefix).is_some_and(|p| p.eq_ignore_ascii_case("glass:")) {
            return line[prefix..].trim().to_string();
        }
    }
    String::new()
}

/// Split the visible text of a detail page into recipe sections.
///
/// The method falls back to the `Preparation` section when there is no
/// `Method` section.
pub fn parse_sections(text: &str) -> RecipeSections {
    let preparation = parse_steps(text, &PREPARATION_HEADING);
    let mut method = parse_steps(text, &METHOD_HEADING);
    if method.is_empty() {
        method = preparation.clone();
    }

    RecipeSections {
        ingredients: parse_ingredients(text),
        method,
        preparation,
        garnish: parse_garnish(text),
        glass: parse_glass(text),
    }
}

fn mentions_unit(text: &str) -> bool {
    let lower = text.to_lowercase();
    UNIT_TOKENS.iter().any(|unit| lower.contains(unit))
}

/// Ingredient lines found in `li`/`p` elements that mention a unit,
/// deduplicated by exact text.
pub fn markup_ingredients<P: Page>(page: &P) -> Vec<String> {
    page.select("li, p")
        .iter()
        .map(|el| el.stripped_text())
        .filter(|text| !text.is_empty() && mentions_unit(text))
        .unique()
        .collect()
}

/// Build a [`Recipe`] from a parsed detail page.
///
/// Category and views come from the catalog and are filled in by the caller.
pub fn extract_recipe<P: Page>(page: &P, url: &str, name: &str) -> Recipe {
    let sections = parse_sections(&page.visible_text());
    let ingredients = if sections.ingredients.is_empty() {
        markup_ingredients(page)
    } else {
        sections.ingredients
    };

    Recipe {
        url: url.to_string(),
        name: name.to_string(),
        ingredients,
        method: sections.method,
        preparation: sections.preparation,
        glass: sections.glass,
        garnish: sections.garnish,
        image: find_image(page),
        video: find_video(page),
        ..Default::default()
    }
}
