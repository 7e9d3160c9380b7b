//! Lightweight article descriptors for routing prompts.

use serde::{Deserialize, Serialize};

use crate::sections::{extract_section_header, split_by_sections};
use crate::text::{char_count, count_words};

/// Default length of [`create_content_summary`] output.
pub const DEFAULT_SUMMARY_LENGTH: usize = 500;

/// A summary of an article that is cheap to put in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    /// Article identifier.
    pub id: String,
    /// Article title.
    pub title: String,
    /// Words in the full document.
    pub word_count: usize,
    /// Caller-supplied keywords.
    pub keywords: Vec<String>,
    /// Level-2 header texts in document order.
    pub sections: Vec<String>,
}

/// Describe a document without carrying its content.
///
/// ```rust
/// use interlink::extract_article_metadata;
///
/// let doc = "## Einleitung\n\nText.\n\n## Fazit\n\nEnde.";
/// let meta = extract_article_metadata("a-1", "Ratgeber", doc, vec!["seo".into()]);
///
/// assert_eq!(meta.sections, vec!["Einleitung", "Fazit"]);
/// assert_eq!(meta.word_count, 6);
/// ```
#[must_use]
pub fn extract_article_metadata(
    id: impl Into<String>,
    title: impl Into<String>,
    document: &str,
    keywords: Vec<String>,
) -> ArticleMetadata {
    let sections = split_by_sections(document)
        .into_iter()
        .filter_map(extract_section_header)
        .map(str::to_string)
        .collect();

    ArticleMetadata {
        id: id.into(),
        title: title.into(),
        word_count: count_words(document),
        keywords,
        sections,
    }
}

/// Shorten a document to at most `max_length` characters.
///
/// Returns the document itself when it fits, else its first section when
/// that fits, else the first `max_length - 3` characters followed by `...`.
///
/// ```rust
/// use interlink::create_content_summary;
///
/// assert_eq!(create_content_summary("Kurz.", 100), "Kurz.");
///
/// let long = "A".repeat(1000);
/// let summary = create_content_summary(&long, 100);
/// assert_eq!(summary.chars().count(), 100);
/// assert!(summary.ends_with("..."));
/// ```
#[must_use]
pub fn create_content_summary(document: &str, max_length: usize) -> String {
    if char_count(document) <= max_length {
        return document.to_string();
    }

    if let Some(first) = split_by_sections(document).first() {
        if char_count(first) <= max_length {
            return (*first).to_string();
        }
    }

    let mut summary: String = document
        .chars()
        .take(max_length.saturating_sub(3))
        .collect();
    summary.push_str("...");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let doc = "## Introduction\n\nSome intro text.\n\n\
                   ## Main Content\n\nThe main part.\n\n\
                   ## Conclusion\n\nFinal thoughts.";
        let meta = extract_article_metadata(
            "article-123",
            "Test Article",
            doc,
            vec!["seo".into(), "marketing".into()],
        );

        assert_eq!(meta.id, "article-123");
        assert_eq!(meta.title, "Test Article");
        assert!(meta.word_count > 0);
        assert_eq!(meta.keywords, vec!["seo", "marketing"]);
        assert_eq!(meta.sections, vec!["Introduction", "Main Content", "Conclusion"]);
    }

    #[test]
    fn test_metadata_without_sections() {
        let meta = extract_article_metadata("id", "Title", "Just plain text.", Vec::new());
        assert!(meta.sections.is_empty());
        assert!(meta.keywords.is_empty());
        assert_eq!(meta.word_count, 3);
    }

    #[test]
    fn test_metadata_skips_leading_section() {
        let meta = extract_article_metadata("id", "T", "# Titel\n\nIntro.\n\n## Teil", Vec::new());
        assert_eq!(meta.sections, vec!["Teil"]);
    }

    #[test]
    fn test_summary_prefers_first_section() {
        let doc = "## First Section\n\nShort first section.\n\n\
                   ## Second Section\n\nMuch longer second section with more content, \
                   enough to overflow the limit.";
        let summary = create_content_summary(doc, 100);
        assert_eq!(summary, "## First Section\n\nShort first section.\n\n");
    }

    #[test]
    fn test_summary_truncates_by_chars() {
        let doc = "ü".repeat(50);
        let summary = create_content_summary(&doc, 10);
        assert_eq!(summary, format!("{}...", "ü".repeat(7)));
    }

    #[test]
    fn test_summary_exact_fit() {
        let doc = "x".repeat(500);
        assert_eq!(create_content_summary(&doc, DEFAULT_SUMMARY_LENGTH), doc);
    }
}
