//! Split granularities for oversized text, coarsest first.
//!
//! ## The Cascade
//!
//! A section that does not fit the limits is broken into paragraphs. A
//! paragraph that still exceeds the character limit is broken into
//! sentences. Sentences are the floor: a single sentence longer than the
//! limit becomes its own oversized chunk rather than being cut mid-word.
//!
//! ```text
//! Section    "## Setup\n\nPara A.\n\nPara B is very long. It goes on."
//!               │ too big
//! Paragraph  ["## Setup", "Para A.", "Para B is very long. It goes on."]
//!                                       │ still > max chars
//! Sentence                             ["Para B is very long.", "It goes on."]
//! ```
//!
//! Each level packs its pieces greedily: pieces are appended (with the
//! level's joiner) while the buffer stays within the limits, and the buffer
//! is flushed when the next piece would overflow it.
//!
//! | Level | Pieces | Joiner | Limit checked |
//! |-------|--------|--------|---------------|
//! | Section | `## ` header blocks | `""` | chars and words |
//! | Paragraph | blank-line blocks | `"\n\n"` | chars and words |
//! | Sentence | `.`/`!`/`?` + whitespace | `" "` | chars only |

use crate::sections::split_by_sections;
use crate::ChunkOptions;

/// One level of the split cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Level-2 Markdown sections.
    Section,
    /// Blank-line separated paragraphs.
    Paragraph,
    /// Sentences ending in `.`, `!` or `?`.
    Sentence,
}

impl Granularity {
    /// Split `text` into this level's pieces.
    ///
    /// Pieces never include the separator that was split on, except for
    /// sections, which are contiguous slices of the input.
    ///
    /// ```rust
    /// use interlink::Granularity;
    ///
    /// let pieces = Granularity::Paragraph.split("One.\n\n\nTwo.");
    /// assert_eq!(pieces, vec!["One.", "Two."]);
    ///
    /// let pieces = Granularity::Sentence.split("Erster Satz. Zweiter Satz! Dritter?");
    /// assert_eq!(pieces, vec!["Erster Satz.", "Zweiter Satz!", "Dritter?"]);
    /// ```
    #[must_use]
    pub fn split(self, text: &str) -> Vec<&str> {
        match self {
            Self::Section => split_by_sections(text),
            Self::Paragraph => split_paragraphs(text),
            Self::Sentence => split_sentences(text),
        }
    }

    /// The string placed between two packed pieces.
    #[must_use]
    pub const fn joiner(self) -> &'static str {
        match self {
            Self::Section => "",
            Self::Paragraph => "\n\n",
            Self::Sentence => " ",
        }
    }

    /// The next finer level, if any.
    #[must_use]
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Section => Some(Self::Paragraph),
            Self::Paragraph => Some(Self::Sentence),
            Self::Sentence => None,
        }
    }

    /// Whether `text` may be packed as one piece at this level.
    #[must_use]
    pub fn fits(self, opts: &ChunkOptions, text: &str) -> bool {
        match self {
            Self::Section | Self::Paragraph => opts.fits(text),
            Self::Sentence => opts.fits_chars(text),
        }
    }

    /// Whether a piece of this level must be handed to the finer level.
    ///
    /// Sections descend when they break either limit. Paragraphs descend
    /// only on the character limit, since sentence packing ignores words.
    #[must_use]
    pub fn needs_finer(self, opts: &ChunkOptions, piece: &str) -> bool {
        match self {
            Self::Section => !opts.fits(piece),
            Self::Paragraph => !opts.fits_chars(piece),
            Self::Sentence => false,
        }
    }

    /// Greedily pack `text` into chunks at this level, descending the
    /// cascade for pieces that are too large on their own.
    #[must_use]
    pub fn pack(self, text: &str, opts: &ChunkOptions) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for piece in self.split(text) {
            if current.is_empty() {
                if self.fits(opts, piece) || !self.needs_finer(opts, piece) {
                    current.push_str(piece);
                } else if let Some(finer) = self.finer() {
                    chunks.extend(finer.pack(piece, opts));
                }
                continue;
            }

            let candidate = format!("{current}{}{piece}", self.joiner());
            if self.fits(opts, &candidate) {
                current = candidate;
                continue;
            }

            chunks.push(std::mem::take(&mut current));
            match self.finer() {
                Some(finer) if self.needs_finer(opts, piece) => {
                    chunks.extend(finer.pack(piece, opts));
                }
                _ => current.push_str(piece),
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

/// Split on runs of two or more newlines, dropping blank pieces.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' && bytes.get(i + 1) == Some(&b'\n') {
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            pieces.push(&text[start..run_start]);
            start = i;
        } else {
            i += 1;
        }
    }
    pieces.push(&text[start..]);

    pieces.retain(|p| !p.trim().is_empty());
    pieces
}

/// Split after terminal punctuation that is followed by whitespace.
///
/// Abbreviations like "z.B. " or "Dr. " count as sentence ends.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let mut resume = end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            resume = j + w.len_utf8();
            chars.next();
        }
        if resume > end {
            pieces.push(&text[start..end]);
            start = resume;
        }
    }
    pieces.push(&text[start..]);

    pieces.retain(|p| !p.trim().is_empty());
    pieces
}
