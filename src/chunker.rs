//! Section-aware article chunking.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. Empty or whitespace-only document      -> no chunks
//! 2. Whole document within both limits      -> one chunk
//! 3. Otherwise split into `## ` sections and pack them greedily:
//!    - next section still fits the buffer   -> append
//!    - otherwise                            -> flush buffer, start new one
//! 4. A section over either limit on its own -> paragraph packing,
//!    and a paragraph over the character limit -> sentence packing
//! 5. Renumber: every chunk gets the final `total`
//! ```
//!
//! Each chunk is labelled with the nearest `## ` header seen so far, so a
//! section that had to be cut into several chunks labels all of them.
//!
//! Section packing concatenates sections verbatim (they keep their own
//! trailing newlines), so packed chunks are exact slices of the input.

use tracing::debug;

use crate::granularity::Granularity;
use crate::sections::extract_section_header;
use crate::text::char_count;
use crate::{ChunkOptions, Chunker, ContentChunk, Result};

/// Split an article into bounded chunks.
///
/// Never fails: degenerate options just push more text down to sentence
/// granularity. Use [`ArticleChunker::new`] to validate options up front.
///
/// ```rust
/// use interlink::{chunk_article, ChunkOptions};
///
/// let doc = format!(
///     "# Guide\n\nIntro.\n\n## Setup\n\n{}\n\n## Usage\n\n{}",
///     "Install it. ".repeat(30),
///     "Run it. ".repeat(30),
/// );
/// let chunks = chunk_article(&doc, &ChunkOptions::default().with_max_chunk_size(400));
///
/// assert!(chunks.len() > 1);
/// for (i, chunk) in chunks.iter().enumerate() {
///     assert_eq!(chunk.index, i);
///     assert_eq!(chunk.total, chunks.len());
/// }
/// assert_eq!(chunks.last().unwrap().section.as_deref(), Some("Usage"));
/// ```
#[must_use]
pub fn chunk_article(document: &str, opts: &ChunkOptions) -> Vec<ContentChunk> {
    if document.trim().is_empty() {
        return vec![];
    }

    if opts.fits(document) {
        return vec![ContentChunk::new(document, 0, None)];
    }

    let mut packer = SectionPacker::default();

    for section in Granularity::Section.split(document) {
        let header = extract_section_header(section);

        if opts.preserve_sections {
            let candidate = format!("{}{section}", packer.buffer);
            if opts.fits(&candidate) {
                packer.buffer = candidate;
                packer.note_header(header);
                continue;
            }
        }

        packer.flush();

        if Granularity::Section.needs_finer(opts, section) {
            packer.note_header(header);
            for piece in Granularity::Paragraph.pack(section, opts) {
                packer.emit(piece);
            }
        } else {
            packer.buffer.push_str(section);
            packer.note_header(header);
        }
    }

    packer.flush();
    let chunks = packer.finish();

    debug!(
        chunks = chunks.len(),
        chars = char_count(document),
        "chunked article"
    );
    chunks
}

/// Running state of the section-level pass.
#[derive(Default)]
struct SectionPacker {
    chunks: Vec<ContentChunk>,
    buffer: String,
    section: Option<String>,
}

impl SectionPacker {
    fn note_header(&mut self, header: Option<&str>) {
        if let Some(header) = header {
            self.section = Some(header.to_string());
        }
    }

    fn emit(&mut self, content: String) {
        let index = self.chunks.len();
        self.chunks
            .push(ContentChunk::new(content, index, self.section.clone()));
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let content = std::mem::take(&mut self.buffer);
            self.emit(content);
        }
    }

    fn finish(mut self) -> Vec<ContentChunk> {
        let total = self.chunks.len();
        for (index, chunk) in self.chunks.iter_mut().enumerate() {
            chunk.index = index;
            chunk.total = total;
        }
        self.chunks
    }
}

/// Reusable chunker holding validated [`ChunkOptions`].
///
/// ## Example
///
/// ```rust
/// use interlink::{ArticleChunker, ChunkOptions, Chunker};
///
/// let chunker = ArticleChunker::new(ChunkOptions::default()).unwrap();
/// let chunks = chunker.chunk("## Kurz\n\nEin kurzer Artikel.");
/// assert_eq!(chunks.len(), 1);
///
/// assert!(ArticleChunker::new(ChunkOptions::new(0, 800)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArticleChunker {
    opts: ChunkOptions,
}

impl ArticleChunker {
    /// Create a chunker.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit in `opts` is zero.
    pub fn new(opts: ChunkOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// The options this chunker packs with.
    #[must_use]
    pub fn options(&self) -> &ChunkOptions {
        &self.opts
    }
}

impl Chunker for ArticleChunker {
    fn chunk(&self, text: &str) -> Vec<ContentChunk> {
        chunk_article(text, &self.opts)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        text_len.div_ceil(self.opts.max_chunk_size).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        assert!(chunk_article("", &ChunkOptions::default()).is_empty());
        assert!(chunk_article("  \n ", &ChunkOptions::default()).is_empty());
    }

    #[test]
    fn test_small_document_single_chunk() {
        let chunks = chunk_article("This is a short article.", &ChunkOptions::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "This is a short article.");
        assert_eq!((chunks[0].index, chunks[0].total), (0, 1));
        assert_eq!(chunks[0].section, None);
    }

    #[test]
    fn test_sections_packed_while_they_fit() {
        let doc = "## A\n\naaaa aaaa\n\n## B\n\nbbbb bbbb\n\n## C\n\ncccc cccc";
        let opts = ChunkOptions::new(40, 800);
        let chunks = chunk_article(doc, &opts);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "## A\n\naaaa aaaa\n\n## B\n\nbbbb bbbb\n\n");
        assert_eq!(chunks[0].section.as_deref(), Some("B"));
        assert_eq!(chunks[1].content, "## C\n\ncccc cccc");
        assert_eq!(chunks[1].section.as_deref(), Some("C"));
    }

    #[test]
    fn test_preserve_sections_off_gives_one_chunk_per_section() {
        let doc = "## A\n\naaaa\n\n## B\n\nbbbb\n\n## C\n\ncccc";
        let opts = ChunkOptions::new(20, 800).with_preserve_sections(false);
        let chunks = chunk_article(doc, &opts);

        assert_eq!(chunks.len(), 3);
        let sections: Vec<_> = chunks.iter().map(|c| c.section.as_deref()).collect();
        assert_eq!(sections, vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn test_oversized_section_split_by_paragraph_keeps_header() {
        let body = "Satz eins. ".repeat(10);
        let doc = format!("Intro.\n\n## Lang\n\n{body}\n\n{body}");
        let opts = ChunkOptions::new(150, 800);
        let chunks = chunk_article(&doc, &opts);

        assert!(chunks.len() >= 3);
        assert_eq!(chunks[0].content, "Intro.\n\n");
        assert_eq!(chunks[0].section, None);
        for chunk in &chunks[1..] {
            assert_eq!(chunk.section.as_deref(), Some("Lang"));
            assert!(chunk.char_count <= 150);
        }
    }

    #[test]
    fn test_word_limit_forces_split() {
        let doc = format!("## Eins\n\n{}\n\n## Zwei\n\n{}", "w ".repeat(30), "w ".repeat(30));
        let opts = ChunkOptions::new(10_000, 40);
        let chunks = chunk_article(&doc, &opts);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.word_count <= 40));
    }

    #[test]
    fn test_unstructured_text_without_punctuation_stays_whole() {
        let doc = "A ".repeat(1000);
        let chunks = chunk_article(&doc, &ChunkOptions::default().with_max_chunk_size(500));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].word_count, 1000);
    }

    #[test]
    fn test_chunker_rejects_zero_limits() {
        assert!(ArticleChunker::new(ChunkOptions::new(0, 10)).is_err());
        assert!(ArticleChunker::new(ChunkOptions::new(10, 0)).is_err());
    }

    #[test]
    fn test_estimate_chunks() {
        let chunker = ArticleChunker::default();
        assert_eq!(chunker.estimate_chunks(0), 1);
        assert_eq!(chunker.estimate_chunks(8001), 3);
    }
}
