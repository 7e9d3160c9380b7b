//! Level-2 Markdown sections.
//!
//! Articles are authored in Markdown with one `## ` header per topic. A
//! section runs from its header line to the next `## ` header; whatever
//! precedes the first header (title, intro) forms a leading section of its
//! own.
//!
//! ```text
//! # Title                 ┐
//! Intro text.             ┘ section 0 (no header)
//! ## Setup                ┐
//! ...                     ┘ section 1 ("Setup")
//! ## Usage                ┐
//! ...                     ┘ section 2 ("Usage")
//! ```
//!
//! Only lines starting with exactly `"## "` open a section: `# ` and `### `
//! headers stay inside whatever section they appear in.

const SECTION_MARKER: &str = "## ";

/// Split a document at every line that starts with `"## "`.
///
/// Each header stays the first line of its section. Sections that are empty
/// after trimming are dropped, so an empty document yields no sections and a
/// document without headers yields exactly one. Concatenating the result
/// reproduces the document minus any whitespace-only sections.
///
/// ```rust
/// use interlink::split_by_sections;
///
/// let doc = "Intro.\n\n## One\n\nFirst.\n\n## Two\n\nSecond.";
/// let sections = split_by_sections(doc);
///
/// assert_eq!(sections.len(), 3);
/// assert!(sections[1].starts_with("## One"));
/// ```
#[must_use]
pub fn split_by_sections(document: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;

    for (offset, _) in document.match_indices(SECTION_MARKER) {
        let at_line_start = offset == 0 || document.as_bytes()[offset - 1] == b'\n';
        if at_line_start && offset > start {
            sections.push(&document[start..offset]);
            start = offset;
        }
    }
    sections.push(&document[start..]);

    sections.retain(|section| !section.trim().is_empty());
    sections
}

/// The text of the first `"## "` header line in `section`, trimmed.
///
/// Returns `None` when the section has no level-2 header.
///
/// ```rust
/// use interlink::extract_section_header;
///
/// assert_eq!(extract_section_header("## Übersicht\n\nText."), Some("Übersicht"));
/// assert_eq!(extract_section_header("### Detail"), None);
/// ```
#[must_use]
pub fn extract_section_header(section: &str) -> Option<&str> {
    section
        .lines()
        .filter_map(|line| line.strip_prefix(SECTION_MARKER))
        .find(|rest| !rest.is_empty())
        .map(str::trim)
}
