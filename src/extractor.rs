//! HTML content extraction.
//!
//! Turns a fetched HTML document into readable text plus metadata. Extraction
//! is infallible: the parser recovers from malformed markup, and every
//! fallback below degrades to an empty string rather than an error.
//!
//! Body text is produced in tiers. First a content container (main, article,
//! common content classes) is located and its headings and text blocks are
//! collected. If that yields under 200 characters the whole body is scanned
//! for headings, paragraphs and list items instead. The result is cleaned
//! line by line, and if fewer than 100 characters survive, a raw walk over
//! every text node is used when it recovers strictly more.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{PageAnalysis, PageMetadata};

/// Minimum characters the container pass must produce before cleaning.
const MIN_STRUCTURED_CHARS: usize = 200;
/// Minimum characters after cleaning before the raw-text fallback kicks in.
const MIN_CLEANED_CHARS: usize = 100;

/// Containers likely to hold the main content, probed in this order.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    "[itemprop=\"articleBody\"]",
    ".content",
    "#content",
    ".main-content",
    ".post",
    ".post-content",
    ".entry",
    ".entry-content",
    ".article-body",
];

static CONTENT_SELECTOR_LIST: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Elements that never contribute readable text, plus ad containers.
/// `[class*="ad"]` also matches unrelated classes like "header", so any
/// text inside such containers is lost with the ad.
static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "script, style, noscript, iframe, img, svg, [class*=\"ad\"], [class*=\"advertisement\"]",
    )
    .unwrap()
});

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

static TEXT_BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p, li").unwrap());

static FLOW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6, p, li").unwrap());

static URL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Extract title, body text and metadata from an HTML document.
pub fn extract(html: &str) -> PageAnalysis {
    let mut document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| element_text(el))
        .unwrap_or_default();

    let metadata = extract_metadata(&document);

    strip_noise(&mut document);

    let text = extract_text(&document);

    PageAnalysis {
        title,
        text,
        metadata,
    }
}

fn extract_text(document: &Html) -> String {
    let structured = content_candidate(document)
        .map(structured_text)
        .unwrap_or_default();

    let assembled = if structured.chars().count() < MIN_STRUCTURED_CHARS {
        body_text(document)
    } else {
        structured
    };

    let cleaned = clean_text(&assembled);

    // TODO: the raw fallback bypasses clean_text, so duplicate and URL-only
    // lines the cleaner dropped reappear on very short pages. Decide whether
    // the fallback output should be cleaned as well.
    if cleaned.chars().count() < MIN_CLEANED_CHARS {
        let raw = raw_text(document);
        if raw.chars().count() > cleaned.chars().count() {
            return raw;
        }
    }

    cleaned
}

/// Detach elements that never carry readable content.
fn strip_noise(document: &mut Html) {
    let ids: Vec<_> = document
        .select(&NOISE_SELECTOR)
        .map(|el| el.id())
        .collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Pick the content container with the most visible text. Ties keep the
/// first element encountered in selector order.
fn content_candidate(document: &Html) -> Option<ElementRef<'_>> {
    let mut best: Option<(ElementRef<'_>, usize)> = None;
    for selector in CONTENT_SELECTOR_LIST.iter() {
        for element in document.select(selector) {
            let len = visible_text_len(element);
            match best {
                Some((_, best_len)) if len <= best_len => {}
                _ => best = Some((element, len)),
            }
        }
    }
    best.map(|(element, _)| element)
}

/// Headings (uppercased) followed by paragraphs and list items from the
/// candidate container, joined with blank lines.
fn structured_text(candidate: ElementRef<'_>) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for heading in candidate.select(&HEADING_SELECTOR) {
        let text = element_text(heading).trim().to_uppercase();
        if !text.is_empty() {
            blocks.push(text);
        }
    }

    for block in candidate.select(&TEXT_BLOCK_SELECTOR) {
        let text = element_text(block).trim().to_string();
        if !text.is_empty() {
            blocks.push(text);
        }
    }

    blocks.join("\n\n")
}

/// Every heading, paragraph and list item under body, in document order.
fn body_text(document: &Html) -> String {
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    body.select(&FLOW_SELECTOR)
        .map(|el| element_text(el).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Every text node under body, one line each. Used only as a last resort;
/// unlike the other passes this output is not cleaned.
fn raw_text(document: &Html) -> String {
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    let mut lines: Vec<&str> = Vec::new();
    for node in body.descendants() {
        if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed);
            }
        }
    }
    lines.join("\n")
}

/// Normalize extracted text: trim lines, drop empties, drop lines that are
/// nothing but a URL or contain no alphanumeric character, and collapse
/// exact duplicates keeping the first occurrence.
fn clean_text(text: &str) -> String {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !URL_LINE_RE.is_match(line))
        .filter(|line| line.chars().any(char::is_alphanumeric))
        .filter(|line| seen.insert(line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_metadata(document: &Html) -> PageMetadata {
    let description = meta_content(document, "description");
    let keywords = meta_content(document, "keywords").map(|raw| {
        raw.split(',')
            .map(|keyword| keyword.trim().to_string())
            .collect()
    });
    let author = meta_content(document, "author");
    let publish_date = ["article:published_time", "pubdate", "date"]
        .iter()
        .find_map(|name| meta_content(document, name));

    PageMetadata {
        description,
        keywords,
        author,
        publish_date,
    }
}

/// Look up a meta value by `name=`, then `property="og:..."`, then a bare
/// `property=`. The first form whose first element carries a non-empty
/// `content` wins.
fn meta_content(document: &Html, name: &str) -> Option<String> {
    let forms = [
        format!("meta[name=\"{name}\"]"),
        format!("meta[property=\"og:{name}\"]"),
        format!("meta[property=\"{name}\"]"),
    ];

    forms.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn visible_text_len(element: ElementRef<'_>) -> usize {
    element.text().map(|chunk| chunk.chars().count()).sum()
}
