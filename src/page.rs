//! Abstract page capability used by every extractor.
//!
//! Extractors never touch a markup tree directly. They work against [`Page`],
//! which exposes CSS selection, per-node attributes and text, the ancestors
//! of a node, and the flattened visible text of the document. [`HtmlPage`]
//! is the `scraper`-backed implementation.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

/// Elements whose text is never visible.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A single element on a page.
pub trait PageNode {
    fn tag_name(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    /// Text of the element: every descendant text node trimmed, empty ones
    /// dropped, and the rest concatenated.
    fn stripped_text(&self) -> String;
    /// All descendant text, untouched.
    fn raw_text(&self) -> String;
}

/// A parsed document.
pub trait Page {
    type Node<'a>: PageNode
    where
        Self: 'a;

    /// Base URL against which relative links resolve.
    fn base_url(&self) -> &Url;

    /// Elements matching `css`, in document order. An invalid selector
    /// matches nothing.
    fn select(&self, css: &str) -> Vec<Self::Node<'_>>;

    /// Ancestors of `node`, nearest first.
    fn ancestors<'a>(&'a self, node: &Self::Node<'a>) -> Vec<Self::Node<'a>>;

    /// Visible text of the whole document in document order.
    fn visible_text(&self) -> String;

    /// Resolve `href` against the base URL.
    fn resolve(&self, href: &str) -> Option<String> {
        self.base_url().join(href.trim()).ok().map(String::from)
    }
}

/// Scraper-backed [`Page`].
pub struct HtmlPage {
    document: Html,
    base_url: Url,
}

impl HtmlPage {
    pub fn parse(html: &str, base_url: Url) -> Self {
        Self {
            document: Html::parse_document(html),
            base_url,
        }
    }
}

impl PageNode for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn stripped_text(&self) -> String {
        self.text().map(str::trim).filter(|t| !t.is_empty()).collect()
    }

    fn raw_text(&self) -> String {
        self.text().collect()
    }
}

impl Page for HtmlPage {
    type Node<'a> = ElementRef<'a>;

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.document.select(&selector).collect(),
            Err(e) => {
                warn!(selector = css, error = %e, "Invalid selector");
                Vec::new()
            }
        }
    }

    fn ancestors<'a>(&'a self, node: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
        node.ancestors().filter_map(ElementRef::wrap).collect()
    }

    fn visible_text(&self) -> String {
        let mut text = String::new();
        for node in self.document.root_element().descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| INVISIBLE_TAGS.contains(&el.value().name()));
            if !hidden {
                text.push_str(fragment);
            }
        }
        text
    }
}
