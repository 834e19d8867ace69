//! Picks the primary image and video of a cocktail detail page.
//!
//! Detail pages carry many images (logos, related cocktails, sponsor
//! banners) and several video links (channel links, embeds). The heuristics
//! here choose one of each, or nothing.

use crate::page::{Page, PageNode};
use url::Url;

const IMAGE_SELECTORS: &[&str] = &[
    r#"img[src*="cocktail"]"#,
    r#"img[src*="iba-cocktail"]"#,
    ".cocktail-image img",
    ".recipe-image img",
    r#"img[alt*="cocktail"]"#,
    r#"img[class*="cocktail"]"#,
    r#"img[src*=".webp"]"#,
    r#"img[src*=".jpg"]"#,
    r#"img[src*=".png"]"#,
];

const IMAGE_SKIP_WORDS: &[&str] = &["logo", "icon", "favicon", "avatar"];

const VIDEO_SELECTORS: &[&str] = &[
    r#"a[href*="youtube.com"]"#,
    r#"a[href*="youtu.be"]"#,
    r#"a[href*="vimeo.com"]"#,
    r#"a[href*="video"]"#,
    r#"iframe[src*="youtube"]"#,
    r#"iframe[src*="vimeo"]"#,
    ".video-link",
    r#"[class*="video"] a"#,
];

const VIDEO_ACTION_KEYWORDS: &[&str] = &["play", "video", "watch", "preparation", "recipe", "how to"];
const VIDEO_GENERIC_TITLES: &[&str] = &["youtube", "youtube channel", "channel"];
const VIDEO_CHANNEL_MARKERS: &[&str] = &["/channel/", "/user/", "youtube.com/c/"];

/// Video hosting services recognized by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoHost {
    YouTube,
    Vimeo,
}

impl VideoHost {
    pub fn detect(url: &str) -> Option<Self> {
        let lower = url.to_lowercase();
        if lower.contains("youtube.com") || lower.contains("youtu.be") {
            Some(VideoHost::YouTube)
        } else if lower.contains("vimeo.com") {
            Some(VideoHost::Vimeo)
        } else {
            None
        }
    }
}

/// The identifying path segment of the page's canonical link: the first
/// segment longer than two characters that is not `iba-cocktail`.
pub fn canonical_slug<P: Page>(page: &P) -> Option<String> {
    let link = page.select(r#"link[rel="canonical"]"#).into_iter().next()?;
    let href = link.attr("href")?;
    let url = Url::parse(href).or_else(|_| page.base_url().join(href)).ok()?;
    url.path_segments()?
        .map(str::to_lowercase)
        .find(|segment| segment.len() > 2 && segment != "iba-cocktail")
}

/// Absolute image URLs in selector order, without duplicates or logo-like
/// images.
fn image_candidates<P: Page>(page: &P) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for selector in IMAGE_SELECTORS {
        for img in page.select(selector) {
            let Some(src) = img.attr("src").filter(|s| !s.trim().is_empty()) else {
                continue;
            };
            let Some(absolute) = page.resolve(src) else {
                continue;
            };
            let lower = absolute.to_lowercase();
            if IMAGE_SKIP_WORDS.iter().any(|w| lower.contains(w)) {
                continue;
            }
            if !candidates.contains(&absolute) {
                candidates.push(absolute);
            }
        }
    }
    candidates
}

/// The page's primary cocktail image.
///
/// An image whose URL contains the canonical slug wins regardless of where
/// it appears; otherwise the first image mentioning `cocktail` is used.
pub fn find_image<P: Page>(page: &P) -> Option<String> {
    let candidates = image_candidates(page);
    if let Some(slug) = canonical_slug(page) {
        if let Some(hit) = candidates.iter().find(|c| c.to_lowercase().contains(&slug)) {
            return Some(hit.clone());
        }
    }
    candidates
        .into_iter()
        .find(|c| c.to_lowercase().contains("cocktail"))
}

fn is_specific_video_href(href: &str) -> bool {
    if href.contains("watch?v=") || href.contains("youtu.be/") {
        return true;
    }
    href.contains("vimeo.com/") && !href.contains("/channels/") && !href.contains("/users/")
}

/// Whether an anchor points at one specific video rather than a channel.
pub fn is_video_link(href: &str, title: &str) -> bool {
    let title = title.to_lowercase();
    if VIDEO_CHANNEL_MARKERS.iter().any(|m| href.contains(m))
        || VIDEO_GENERIC_TITLES.contains(&title.as_str())
    {
        return false;
    }
    is_specific_video_href(href) || VIDEO_ACTION_KEYWORDS.iter().any(|k| title.contains(k))
}

/// The page's primary preparation video.
///
/// Embedded frames qualify only when they embed a specific video; anchors
/// are checked with [`is_video_link`]. Either way the result is absolute.
pub fn find_video<P: Page>(page: &P) -> Option<String> {
    for selector in VIDEO_SELECTORS {
        for element in page.select(selector) {
            if element.tag_name() == "iframe" {
                let embedded = element
                    .attr("src")
                    .filter(|src| src.contains("watch?v=") || src.contains("embed/"))
                    .and_then(|src| page.resolve(src));
                if embedded.is_some() {
                    return embedded;
                }
                continue;
            }

            let Some(href) = element.attr("href").filter(|h| !h.is_empty()) else {
                continue;
            };
            let Some(absolute) = page.resolve(href) else {
                continue;
            };
            if is_video_link(&absolute, &element.stripped_text()) {
                return Some(absolute);
            }
        }
    }
    None
}
