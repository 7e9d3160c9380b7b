//! # interlink
//!
//! Internal linking and section-aware chunking for SEO article pipelines.
//!
//! ## The Problem
//!
//! A content site publishes hundreds of articles, each built around one
//! primary keyword. Two jobs come up again and again:
//!
//! - **Linking**: whenever an article mentions another article's keyword,
//!   that mention should link to it. Once, not every time. Never inside an
//!   `alt` attribute, never inside a link that is already there.
//! - **Chunking**: an LLM pass over a 6,000-word article needs the article in
//!   pieces. Cutting every N characters splits sentences and separates
//!   headers from their sections.
//!
//! ## Internal Linking
//!
//! ```text
//! Catalog:   "Body Cam" -> /body-cam      "Dashcam" -> /posts/123
//! Content:   <p>Eine Dashcam und eine Body Cam. Noch eine Body Cam.</p>
//!
//! find_internal_links  -> [Body Cam, Dashcam]            (catalog order)
//! insert_links_into_html ->
//!   <p>Eine <a href="/posts/123" ...>Dashcam</a> und eine
//!      <a href="/body-cam" ...>Body Cam</a>. Noch eine Body Cam.</p>
//! ```
//!
//! Matching filters by language, never links an article to itself, and
//! never links two keywords to the same slug. Insertion links only the first
//! whole-word occurrence in visible, unlinked text.
//!
//! ## Chunking
//!
//! Articles are split at `## ` headers and the sections are packed greedily
//! up to a character and a word limit. Sections that are too big on their
//! own fall back to paragraphs, and paragraphs to sentences.
//!
//! ```text
//! ## Setup   (900 chars)  ┐ chunk 0  section: "Usage"
//! ## Usage   (2500 chars) ┘
//! ## Specs   (9000 chars) ─> paragraphs ─> chunks 1..=3  section: "Specs"
//! ## Fazit   (600 chars)  ─ chunk 4  section: "Fazit"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use interlink::{
//!     chunk_article, insert_links_into_html, ChunkOptions, LinkCatalog, LinkableArticle,
//! };
//!
//! let catalog = LinkCatalog::new(vec![
//!     LinkableArticle::new("a", "Body Cam Ratgeber", "body-cam", "Body Cam", "de"),
//!     LinkableArticle::new("b", "Dashcam Test", "dashcam-test", "Dashcam", "de")
//!         .with_external_post_id(123),
//! ]);
//!
//! let html = "<p>Die beste Body Cam und eine gute Dashcam.</p>";
//! let links = catalog.find_internal_links(html, "current", "de", 5);
//! let linked = insert_links_into_html(html, &links);
//! assert!(linked.contains(r#"<a href="/posts/123""#));
//!
//! let chunks = chunk_article("## Kurz\n\nEin kurzer Artikel.", &ChunkOptions::default());
//! assert_eq!(chunks.len(), 1);
//! ```
//!
//! ## Helpers
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`count_words`] | whitespace word count used by every limit |
//! | [`estimate_tokens`] | `ceil(chars / 4)` |
//! | [`create_slug`] | URL slug with German transliteration |
//! | [`extract_article_metadata`] | id, title, word count, section headers |
//! | [`create_content_summary`] | short routing summary |
//! | [`limit_tool_output`] | keep agent tool results within a budget |
//!
//! Publishing ([`prepare_post`], [`publish_batch`]) ties linking and slugs
//! to a remote [`PostSink`].

mod catalog;
mod chunk;
mod chunker;
mod error;
mod granularity;
mod html;
mod markdown;
mod metadata;
mod options;
mod publish;
mod scan;
mod sections;
mod text;
mod tool_output;

pub use catalog::{CatalogStats, InternalLink, LinkCatalog, LinkableArticle, DEFAULT_MAX_LINKS};
pub use chunk::ContentChunk;
pub use chunker::{chunk_article, ArticleChunker};
pub use error::{Error, Result};
pub use granularity::Granularity;
pub use html::{insert_links_into_html, insert_links_into_html_with_class, DEFAULT_LINK_CLASS};
pub use markdown::insert_links_into_markdown;
pub use metadata::{
    create_content_summary, extract_article_metadata, ArticleMetadata, DEFAULT_SUMMARY_LENGTH,
};
pub use options::{ChunkOptions, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_CHUNK_WORDS};
pub use publish::{
    prepare_post, publish_batch, ArticleDraft, BatchReport, PostSink, PostStatus, PreparedPost,
    PublishError, PublishOptions, PublishOutcome,
};
pub use sections::{extract_section_header, split_by_sections};
pub use text::{char_count, count_words, create_slug, estimate_tokens};
pub use tool_output::{limit_tool_output, LimitedOutput, DEFAULT_TOOL_OUTPUT_SIZE};

/// A document chunking strategy.
///
/// ```rust
/// use interlink::{ArticleChunker, Chunker, ContentChunk};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<ContentChunk> {
///     chunker.chunk(text)
/// }
///
/// let chunks = chunk_document(&ArticleChunker::default(), "## Eins\n\nText.");
/// assert_eq!(chunks[0].total, 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks numbered `0..total`.
    fn chunk(&self, text: &str) -> Vec<ContentChunk>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 4000).max(1)
    }
}
