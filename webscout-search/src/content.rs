//! HTML content extraction: strips boilerplate and returns readable text.
//!
//! Parses raw HTML, skips non-content subtrees (scripts, styles,
//! navigation, headers, footers, ads, forms and interactive controls),
//! then tries content selectors from most to least specific, accepting the
//! first whose cleaned text is long enough. The result is whitespace
//! normalised and suitable for summarisation.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::config::ExtractConfig;
use crate::types::{ExtractedContent, RawDocument};

/// Subtrees that never contribute text.
const NOISE_SELECTORS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "canvas", "iframe", "object",
    "nav", "header", "footer", "aside", "form", "button", "input", "select", "textarea",
    "label", "dialog", "menu",
    "[role=\"navigation\"]", "[role=\"banner\"]", "[role=\"contentinfo\"]",
    "[role=\"complementary\"]", "[role=\"search\"]", "[aria-hidden=\"true\"]",
    ".ad", ".ads", ".advert", ".advertisement", ".sponsored", ".promo",
    "[id^=\"google_ads\"]", "[class*=\"cookie\"]", ".newsletter", ".share", ".social",
    ".sidebar", ".breadcrumb", ".breadcrumbs", ".comments", ".related", ".popup", ".modal",
];

/// Content roots, most specific first. `body` is always last.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=\"main\"]",
    "[itemprop=\"articleBody\"]",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".article-body",
    "#content",
    ".content",
    "body",
];

/// Elements after which a line break is emitted.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// Marker appended when text is cut at `max_chars`.
const TRUNCATION_MARKER: &str = "\n\n[Content truncated]";

/// Stateless extractor with precompiled selectors.
pub struct ContentExtractor {
    config: ExtractConfig,
    noise: Vec<Selector>,
    content: Vec<(&'static str, Selector)>,
}

impl ContentExtractor {
    /// Build an extractor with the given thresholds.
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            noise: compile(NOISE_SELECTORS).into_iter().map(|(_, s)| s).collect(),
            content: compile(CONTENT_SELECTORS),
        }
    }

    /// Extract readable content from a fetched document.
    ///
    /// Returns `None` when the cleaned text is shorter than
    /// [`MIN_CONTENT_LENGTH`](crate::types::MIN_CONTENT_LENGTH) characters.
    pub fn extract(&self, document: &RawDocument) -> Option<ExtractedContent> {
        let text = self.extract_text(&document.body)?;
        ExtractedContent::new(text, document.url.clone())
    }

    /// Extract cleaned text from raw HTML.
    pub fn extract_text(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let mut fallback = String::new();
        for (name, selector) in &self.content {
            let Some(root) = document.select(selector).find(|el| !self.in_noise(*el)) else {
                continue;
            };
            let text = self.clean_text(root);
            let length = text.chars().count();
            if length > self.config.accept_threshold {
                tracing::trace!(selector = *name, length, "content root accepted");
                return Some(truncate_to_limit(text, self.config.max_chars));
            }
            fallback = text;
        }

        // No root passed the acceptance threshold; the last root tried
        // (the body) is the final candidate.
        if fallback.chars().count() < crate::types::MIN_CONTENT_LENGTH {
            tracing::debug!(length = fallback.chars().count(), "extraction below minimum length");
            return None;
        }
        Some(truncate_to_limit(fallback, self.config.max_chars))
    }

    /// True when the element or any ancestor matches a noise selector.
    fn in_noise(&self, element: ElementRef<'_>) -> bool {
        std::iter::once(element)
            .chain(element.ancestors().filter_map(ElementRef::wrap))
            .any(|el| self.noise.iter().any(|s| s.matches(&el)))
    }

    fn clean_text(&self, root: ElementRef<'_>) -> String {
        let mut raw = String::new();
        self.collect_text(root, &mut raw);
        normalise_whitespace(&raw)
    }

    /// Depth-first text collection that skips noise subtrees.
    fn collect_text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => {
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if self.noise.iter().any(|s| s.matches(&child_el)) {
                        continue;
                    }
                    let block = BLOCK_ELEMENTS.contains(&el.name());
                    if block {
                        out.push('\n');
                    }
                    self.collect_text(child_el, out);
                    if block {
                        out.push('\n');
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

fn compile(selectors: &[&'static str]) -> Vec<(&'static str, Selector)> {
    selectors
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some((*s, selector)),
            Err(e) => {
                tracing::warn!(selector = s, error = ?e, "skipping invalid selector");
                None
            }
        })
        .collect()
}

/// Collapse whitespace runs to single spaces and blank-line runs to one blank line.
fn normalise_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            pending_blank = true;
            continue;
        }
        if !result.is_empty() {
            result.push_str(if pending_blank { "\n\n" } else { "\n" });
        }
        result.push_str(&line);
        pending_blank = false;
    }

    result
}

/// Truncate text to the given character limit, appending a marker.
fn truncate_to_limit(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text,
        Some((end, _)) => {
            let mut truncated = text[..end].to_owned();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
