//! Chunk size configuration.
//!
//! ## Two Limits
//!
//! Downstream LLM calls care about two things at once:
//!
//! - **Characters**: a proxy for tokens (~4 chars per token for English/German)
//! - **Words**: what editors and prompts reason about ("max 800 words")
//!
//! A chunk must satisfy both. A section with long compound words can blow the
//! character budget long before the word budget, and a list of short words
//! can do the opposite.
//!
//! ```text
//! max_chunk_size = 4000 chars, max_chunk_words = 800
//!
//! "## Setup\n..."   3200 chars, 610 words  -> fits
//! "## Specs\n..."   3900 chars, 950 words  -> too many words, split
//! "## Fazit\n..."   4400 chars, 700 words  -> too many chars, split
//! ```
//!
//! Options deserialize from the camelCase JSON the content pipeline already
//! uses; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::text::{char_count, count_words};
use crate::{Error, Result};

/// Default character limit per chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 4000;

/// Default word limit per chunk.
pub const DEFAULT_MAX_CHUNK_WORDS: usize = 800;

/// Options for [`chunk_article`](crate::chunk_article).
///
/// # Examples
///
/// ```rust
/// use interlink::ChunkOptions;
///
/// let opts = ChunkOptions::default();
/// assert_eq!(opts.max_chunk_size, 4000);
/// assert_eq!(opts.max_chunk_words, 800);
/// assert!(opts.preserve_sections);
///
/// let opts = ChunkOptions::default().with_max_chunk_size(2000);
/// assert!(opts.fits("short text"));
///
/// let opts: ChunkOptions = serde_json::from_str(r#"{"maxChunkWords": 300}"#).unwrap();
/// assert_eq!(opts.max_chunk_words, 300);
/// assert_eq!(opts.max_chunk_size, 4000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkOptions {
    /// Maximum characters per chunk.
    pub max_chunk_size: usize,
    /// Maximum words per chunk.
    pub max_chunk_words: usize,
    /// Pack whole sections together while they fit.
    pub preserve_sections: bool,
    /// Characters to overlap between chunks.
    ///
    /// Accepted for compatibility with stored configurations; packing does
    /// not read it.
    pub overlap_size: usize,
}

impl ChunkOptions {
    /// Options with the given character and word limits.
    #[must_use]
    pub const fn new(max_chunk_size: usize, max_chunk_words: usize) -> Self {
        Self {
            max_chunk_size,
            max_chunk_words,
            preserve_sections: true,
            overlap_size: 0,
        }
    }

    /// Set the character limit.
    #[must_use]
    pub const fn with_max_chunk_size(self, max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size,
            ..self
        }
    }

    /// Set the word limit.
    #[must_use]
    pub const fn with_max_chunk_words(self, max_chunk_words: usize) -> Self {
        Self {
            max_chunk_words,
            ..self
        }
    }

    /// Enable or disable packing several sections into one chunk.
    #[must_use]
    pub const fn with_preserve_sections(self, preserve_sections: bool) -> Self {
        Self {
            preserve_sections,
            ..self
        }
    }

    /// Set the (unused) overlap.
    #[must_use]
    pub const fn with_overlap_size(self, overlap_size: usize) -> Self {
        Self {
            overlap_size,
            ..self
        }
    }

    /// Check that both limits are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.max_chunk_size));
        }
        if self.max_chunk_words == 0 {
            return Err(Error::InvalidChunkWords(self.max_chunk_words));
        }
        Ok(())
    }

    /// Whether `text` is within both the character and the word limit.
    #[must_use]
    pub fn fits(&self, text: &str) -> bool {
        self.fits_chars(text) && count_words(text) <= self.max_chunk_words
    }

    /// Whether `text` is within the character limit.
    #[must_use]
    pub fn fits_chars(&self, text: &str) -> bool {
        char_count(text) <= self.max_chunk_size
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_CHUNK_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ChunkOptions::default();
        assert_eq!(opts.max_chunk_size, 4000);
        assert_eq!(opts.max_chunk_words, 800);
        assert!(opts.preserve_sections);
        assert_eq!(opts.overlap_size, 0);
    }

    #[test]
    fn test_fits_both_limits() {
        let opts = ChunkOptions::new(10, 2);
        assert!(opts.fits("one two"));
        assert!(!opts.fits("one two three"));
        assert!(!opts.fits("abcdefghijk"));
        assert!(opts.fits_chars("one two th"));
    }

    #[test]
    fn test_fits_counts_chars_not_bytes() {
        let opts = ChunkOptions::new(3, 10);
        assert!(opts.fits("äöü"));
    }

    #[test]
    fn test_validate() {
        assert!(ChunkOptions::default().validate().is_ok());
        assert!(matches!(
            ChunkOptions::new(0, 10).validate(),
            Err(Error::InvalidChunkSize(0))
        ));
        assert!(matches!(
            ChunkOptions::new(10, 0).validate(),
            Err(Error::InvalidChunkWords(0))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: ChunkOptions =
            serde_json::from_str(r#"{"maxChunkSize": 2000, "preserveSections": false}"#).unwrap();
        assert_eq!(opts.max_chunk_size, 2000);
        assert_eq!(opts.max_chunk_words, 800);
        assert!(!opts.preserve_sections);
    }
}
