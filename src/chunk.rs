//! The ContentChunk type: a bounded slice of an article.

use serde::{Deserialize, Serialize};

use crate::text::{char_count, count_words, estimate_tokens};

/// A slice of a larger document, sized for a single LLM call.
///
/// Every chunk of one split carries the same `total`, and `index` is its
/// position among its siblings:
///
/// ```text
/// Article: "# Title\nIntro\n## Setup\n...\n## Usage\n..."
///
/// Chunk 0/3: "# Title\nIntro\n"     section: None
/// Chunk 1/3: "## Setup\n..."        section: Some("Setup")
/// Chunk 2/3: "## Usage\n..."        section: Some("Usage")
/// ```
///
/// Serializes with camelCase keys (`wordCount`, `charCount`) and omits
/// `section` when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    /// Zero-based position among sibling chunks.
    pub index: usize,
    /// Number of chunks in the split.
    pub total: usize,
    /// The chunk text, including any header line.
    pub content: String,
    /// Nearest preceding level-2 header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Words in `content`.
    pub word_count: usize,
    /// Characters in `content`.
    pub char_count: usize,
}

impl ContentChunk {
    /// Create a chunk, computing its word and character counts.
    ///
    /// `total` starts equal to `index + 1` and is fixed up once the whole
    /// split is known.
    #[must_use]
    pub fn new(content: impl Into<String>, index: usize, section: Option<String>) -> Self {
        let content = content.into();
        Self {
            index,
            total: index + 1,
            word_count: count_words(&content),
            char_count: char_count(&content),
            content,
            section,
        }
    }

    /// Whether this is the last chunk of its split.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Rough token estimate for this chunk, see [`estimate_tokens`].
    #[must_use]
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.content)
    }
}

impl std::fmt::Display for ContentChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ {}/{}, section: {}, words: {}, chars: {} }}",
            self.index + 1,
            self.total,
            self.section.as_deref().unwrap_or("-"),
            self.word_count,
            self.char_count
        )
    }
}
