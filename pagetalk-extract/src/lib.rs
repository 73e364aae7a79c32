//! Structural content extraction and bounding for scraped pages.
//!
//! - [`extract::extract_lines`]: DOM walk producing ordered [`TaggedLine`]s
//! - [`truncate::truncate_at_sentence`]: sentence-preserving size bound
//! - [`ScrapedDocument`]: the serialized, bounded result handed to the
//!   session store and the prompt layer

pub mod extract;
pub mod truncate;

pub use extract::{extract_lines, ExtractOutcome, Tag, TaggedLine};
pub use truncate::{truncate_at_sentence, DEFAULT_TRUNCATION_BUDGET};

use serde::{Deserialize, Serialize};

/// The extracted content of one page, serialized as `TAG: text` lines and
/// already bounded to the truncation budget. Immutable after composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedDocument {
    pub content: String,
    pub source_url: String,
}

impl ScrapedDocument {
    /// Serialize tagged lines into prompt context and apply the size bound.
    pub fn compose(lines: &[TaggedLine], source_url: &str, max_chars: usize) -> Self {
        let joined = lines
            .iter()
            .map(|line| format!("{}: {}", line.tag.label(), line.text))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            content: truncate_at_sentence(&joined, max_chars).to_string(),
            source_url: source_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_serializes_lines_with_tag_labels() {
        let lines = vec![
            TaggedLine {
                tag: Tag::Title,
                text: "Example".into(),
            },
            TaggedLine {
                tag: Tag::P,
                text: "Hello world.".into(),
            },
        ];
        let doc = ScrapedDocument::compose(&lines, "https://example.com", 12_000);
        assert_eq!(doc.content, "TITLE: Example\nP: Hello world.");
        assert_eq!(doc.source_url, "https://example.com");
    }

    #[test]
    fn compose_applies_the_budget() {
        let lines = vec![TaggedLine {
            tag: Tag::P,
            text: "One. Two. Three.".into(),
        }];
        let doc = ScrapedDocument::compose(&lines, "https://example.com", 12);
        assert!(doc.content.len() <= 12);
        assert!(doc.content.ends_with('.'));
    }
}
