//! DOM content extraction.
//!
//! Walks a parsed HTML document and emits the human-readable structural
//! content as ordered [`TaggedLine`]s: an optional meta description and
//! title first, then every content-bearing element inside the page's
//! main-content scope in document order.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Ordered fallback list for the main-content scope. The first selector
/// with at least one match wins; semantic containers are preferred over
/// the whole body to keep navigation, footers, and ads out of the context.
const SCOPE_SELECTORS: &[&str] = &[
    "main",
    "article",
    "#content",
    ".content",
    "[role='main']",
    "#main-content",
];

/// Whitelist of content-bearing elements collected within the scope.
const CONTENT_SELECTOR: &str = "h1, h2, h3, h4, p, li, table, dl, blockquote";

/// Structural origin of one extracted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    MetaDescription,
    Title,
    H1,
    H2,
    H3,
    H4,
    P,
    Li,
    Table,
    Dl,
    Blockquote,
}

impl Tag {
    /// Uppercase label used in the serialized context.
    pub fn label(&self) -> &'static str {
        match self {
            Tag::MetaDescription => "META_DESCRIPTION",
            Tag::Title => "TITLE",
            Tag::H1 => "H1",
            Tag::H2 => "H2",
            Tag::H3 => "H3",
            Tag::H4 => "H4",
            Tag::P => "P",
            Tag::Li => "LI",
            Tag::Table => "TABLE",
            Tag::Dl => "DL",
            Tag::Blockquote => "BLOCKQUOTE",
        }
    }

    fn from_element_name(name: &str) -> Option<Tag> {
        match name {
            "h1" => Some(Tag::H1),
            "h2" => Some(Tag::H2),
            "h3" => Some(Tag::H3),
            "h4" => Some(Tag::H4),
            "p" => Some(Tag::P),
            "li" => Some(Tag::Li),
            "table" => Some(Tag::Table),
            "dl" => Some(Tag::Dl),
            "blockquote" => Some(Tag::Blockquote),
            _ => None,
        }
    }
}

/// One unit of extracted content with its structural origin. The text is
/// always non-empty and whitespace-normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedLine {
    pub tag: Tag,
    pub text: String,
}

/// Result of extraction over a loaded page. A page that parsed fine but
/// yielded nothing extractable is an explicit status, not an empty
/// success, so callers can report it as its own failure class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Content(Vec<TaggedLine>),
    NoContent,
}

/// Extract the ordered tagged content lines of an HTML page.
pub fn extract_lines(html: &str) -> ExtractOutcome {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    if let Some(description) = meta_description(&document) {
        lines.push(TaggedLine {
            tag: Tag::MetaDescription,
            text: description,
        });
    }
    if let Some(title) = page_title(&document) {
        lines.push(TaggedLine {
            tag: Tag::Title,
            text: title,
        });
    }

    if let Some(scope) = content_scope(&document) {
        if let Ok(selector) = Selector::parse(CONTENT_SELECTOR) {
            for element in scope.select(&selector) {
                let Some(tag) = Tag::from_element_name(element.value().name()) else {
                    continue;
                };
                let text = normalised_text(element);
                if !text.is_empty() {
                    lines.push(TaggedLine { tag, text });
                }
            }
        }
    }

    if lines.is_empty() {
        ExtractOutcome::NoContent
    } else {
        ExtractOutcome::Content(lines)
    }
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    let element = document.select(&selector).next()?;
    let content = element.value().attr("content")?.trim();
    (!content.is_empty()).then(|| content.to_string())
}

fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    let title = normalised_text(element);
    (!title.is_empty()).then_some(title)
}

/// Pick the main-content subtree via the ordered selector fallback,
/// defaulting to the whole body when nothing semantic matches.
fn content_scope(document: &Html) -> Option<ElementRef<'_>> {
    for raw in SCOPE_SELECTORS {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(scope) = document.select(&selector).next() {
                return Some(scope);
            }
        }
    }

    let body = Selector::parse("body").ok()?;
    document.select(&body).next()
}

/// Collapse an element's descendant text into single-space-separated,
/// trimmed form.
fn normalised_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
