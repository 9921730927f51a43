//! Readable text extraction and the content gate
//!
//! [`TextExtractor`] turns raw page bytes into the page's primary readable
//! text. [`ContentGate`] fetches a page, runs the extractor, and only lets
//! the text through when it is long enough to be worth recording.

use crate::crawler::fetcher::Fetcher;
use crate::url::CanonicalUrl;
use html2text::render::text_renderer::TrivialDecorator;
use scraper::{ElementRef, Html, Selector};

/// Minimum word count a page must exceed to be recorded
pub const DEFAULT_MIN_WORDS: usize = 50;

/// Containers tried in order when looking for the main content
const CONTENT_ROOTS: &[&str] = &["article", "main", "[role=main]", "body"];

/// Page furniture that never counts as readable text
const BOILERPLATE: &str = "nav, header, footer, aside, form, script, style, noscript, \
    template, iframe, svg, [role=navigation], [role=banner], [role=contentinfo], \
    [aria-hidden=true]";

/// Line width handed to the text renderer
const RENDER_WIDTH: usize = 400;

/// Capability to extract the primary readable text from raw page bytes
pub trait TextExtractor: Send + Sync {
    /// Returns the readable text, or `None` when there is none
    fn extract_text(&self, raw: &[u8]) -> Option<String>;
}

/// Extractor that renders the page's main content area as plain text
///
/// Boilerplate subtrees (navigation, headers, footers, asides, forms,
/// scripts) are cut out of the document first. The first remaining
/// `<article>`, `<main>`, `[role=main]` or `<body>` is then rendered to text
/// with `html2text`, one line per block, with markup and link targets dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadableTextExtractor;

impl ReadableTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_from_html(&self, html: &str) -> Option<String> {
        let mut document = Html::parse_document(html);
        strip_boilerplate(&mut document)?;

        let root = find_content_root(&document)?;
        let rendered = html2text::from_read_with_decorator(
            root.html().as_bytes(),
            RENDER_WIDTH,
            TrivialDecorator::new(),
        );

        let text = rendered
            .lines()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl TextExtractor for ReadableTextExtractor {
    fn extract_text(&self, raw: &[u8]) -> Option<String> {
        let html = String::from_utf8_lossy(raw);
        self.extract_from_html(&html)
    }
}

/// Detaches every boilerplate subtree from the document
fn strip_boilerplate(document: &mut Html) -> Option<()> {
    let selector = Selector::parse(BOILERPLATE).ok()?;
    let doomed: Vec<_> = document
        .root_element()
        .select(&selector)
        .map(|el| el.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    Some(())
}

/// Returns the first content root still attached to the document
///
/// Searches from the root element, so detached subtrees are never matched.
fn find_content_root(document: &Html) -> Option<ElementRef<'_>> {
    let top = document.root_element();
    CONTENT_ROOTS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        top.select(&selector).next()
    })
}

/// Collapses every whitespace run in a line to one space
fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minimum-length acceptance filter around fetch and extraction
///
/// Fetch failures, extraction failures, and pages without text all come out
/// as `None`; the caller cannot and need not tell them apart.
#[derive(Debug, Clone)]
pub struct ContentGate<X> {
    extractor: X,
    min_words: usize,
}

impl<X: TextExtractor> ContentGate<X> {
    /// Creates a gate; text must have more than `min_words` words to pass
    pub fn new(extractor: X, min_words: usize) -> Self {
        Self {
            extractor,
            min_words,
        }
    }

    /// Returns true if the text is long enough to record
    pub fn qualifies(&self, text: &str) -> bool {
        word_count(text) > self.min_words
    }

    /// Fetches `url` and returns its readable text if it qualifies
    pub async fn fetch_qualified_content<F: Fetcher>(
        &self,
        fetcher: &F,
        url: &CanonicalUrl,
    ) -> Option<String> {
        let raw = match fetcher.fetch(url.as_url()).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Content fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let text = self.extractor.extract_text(&raw)?;
        if self.qualifies(&text) {
            Some(text)
        } else {
            tracing::debug!(
                "Content at {} has {} words, need more than {}",
                url,
                word_count(&text),
                self.min_words
            );
            None
        }
    }
}
