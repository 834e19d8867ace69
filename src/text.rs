//! Text normalization for catalog link text and multi-line recipe sections.

use once_cell::sync::Lazy;
use regex::Regex;

static VIEWS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?[KM]?)\s*views?").expect("valid regex"));

/// Category names that the catalog sometimes renders inside the link text.
/// Order matters: longer phrases are removed before their sub-phrases.
static CATEGORY_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)The\s+unforgettables?",
        r"(?i)Contemporary\s+Classics?",
        r"(?i)New\s+Era\s+Drinks?",
        r"(?i)New\s+Era",
        r"(?i)Unforgettables?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-_]+").expect("valid regex"));

static EDGE_NOISE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-zA-Z]+|[^a-zA-Z0-9\s']+$").expect("valid regex"));

static NEWLINES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

/// Split raw catalog link text into a clean cocktail name and a view count.
///
/// The name is `None` when fewer than two characters survive cleaning; the
/// caller discards such links.
///
/// ```ignore
/// assert_eq!(
///     clean_name("Negroni 108.9K views"),
///     (Some("Negroni".into()), Some("108.9K".into()))
/// );
/// ```
pub fn clean_name(raw: &str) -> (Option<String>, Option<String>) {
    if raw.is_empty() {
        return (None, None);
    }

    let views = VIEWS_REGEX
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let mut text = VIEWS_REGEX.replace_all(raw, "").into_owned();
    for re in CATEGORY_REGEXES.iter() {
        text = re.replace_all(&text, "").into_owned();
    }

    let text = SEPARATOR_REGEX.replace_all(&text, " ");
    let text = EDGE_NOISE_REGEX.replace_all(text.trim(), "");
    let name = text.trim();

    if name.chars().count() < 2 {
        return (None, views);
    }
    (Some(name.to_string()), views)
}

/// One step per line: split on newline runs, trim, drop blanks, rejoin.
///
/// Idempotent.
pub fn normalize_steps(text: &str) -> String {
    NEWLINES_REGEX
        .split(text.trim())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filesystem-safe stem for media files named after a cocktail.
///
/// Keeps ASCII letters, digits, whitespace and `-`, then turns whitespace
/// runs into `_`.
pub fn safe_file_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}
