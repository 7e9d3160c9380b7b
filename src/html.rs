//! Internal link insertion for HTML.
//!
//! ## Where Links May Go
//!
//! A keyword may only become a link where it is visible, unlinked text:
//!
//! ```text
//! <p>Die beste <img alt="Body Cam"> Body Cam</p>
//!                        ^^^^^^^^   ^^^^^^^^
//!                        attribute  text -> linked
//!
//! <a href="/x">Body Cam</a> und Body Cam
//!              ^^^^^^^^         ^^^^^^^^
//!              already linked   linked
//! ```
//!
//! Rather than regex lookaround, the document is tokenized into text runs.
//! Runs inside tags, comments, `<script>`/`<style>` bodies and `<a>`
//! elements are excluded. Malformed markup degrades gracefully: an
//! unterminated tag swallows the rest of the document, which then simply
//! receives no links.

use std::ops::Range;

use tracing::debug;

use crate::scan::find_word;
use crate::InternalLink;

/// CSS classes on inserted anchors.
pub const DEFAULT_LINK_CLASS: &str = "text-blue-600 hover:text-blue-800 underline font-semibold";

/// Link the first free occurrence of each keyword in `html`.
///
/// Links are applied in order against the progressively rewritten document,
/// so a later link never lands inside an anchor inserted by an earlier one.
/// Matched text keeps its casing; links without a free whole-word
/// occurrence are skipped.
///
/// ```rust
/// use interlink::{insert_links_into_html, InternalLink};
///
/// let link = InternalLink {
///     keyword: "Body Cam".into(),
///     target_slug: "body-cam".into(),
///     target_title: "Body Cam Ratgeber".into(),
///     target_url: "/body-cam".into(),
///     language: "de".into(),
/// };
///
/// let html = insert_links_into_html("<p>Eine body cam. Noch eine Body Cam.</p>", &[link]);
/// assert_eq!(
///     html,
///     "<p>Eine <a href=\"/body-cam\" \
///      class=\"text-blue-600 hover:text-blue-800 underline font-semibold\" \
///      title=\"Body Cam Ratgeber\">body cam</a>. Noch eine Body Cam.</p>"
/// );
/// ```
#[must_use]
pub fn insert_links_into_html(html: &str, links: &[InternalLink]) -> String {
    insert_links_into_html_with_class(html, links, DEFAULT_LINK_CLASS)
}

/// [`insert_links_into_html`] with a custom `class` attribute.
#[must_use]
pub fn insert_links_into_html_with_class(
    html: &str,
    links: &[InternalLink],
    class: &str,
) -> String {
    let mut linked = html.to_string();
    let mut inserted = 0;

    for link in links {
        let segments = linkable_text(&linked);
        let Some(found) = find_word(&linked, &segments, &link.keyword) else {
            continue;
        };

        let anchor = format!(
            r#"<a href="{}" class="{}" title="{}">{}</a>"#,
            escape_attr(&link.target_url),
            escape_attr(class),
            escape_attr(&link.target_title),
            &linked[found.clone()]
        );
        linked.replace_range(found, &anchor);
        inserted += 1;
    }

    debug!(
        inserted,
        skipped = links.len() - inserted,
        "inserted internal links into HTML"
    );
    linked
}

/// Escape a value for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Byte ranges of text that is visible and not inside an anchor.
fn linkable_text(html: &str) -> Vec<Range<usize>> {
    let bytes = html.as_bytes();
    let mut segments = Vec::new();
    let mut anchor_depth = 0usize;
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' || !opens_markup(bytes.get(i + 1).copied()) {
            i += 1;
            continue;
        }

        if anchor_depth == 0 && i > text_start {
            segments.push(text_start..i);
        }

        let tag = Tag::parse(html, i);
        match tag.name.as_deref() {
            Some("a") if tag.closing => anchor_depth = anchor_depth.saturating_sub(1),
            Some("a") if !tag.self_closing => anchor_depth += 1,
            Some(raw @ ("script" | "style")) if !tag.closing => {
                i = skip_raw_text(html, tag.end, raw);
                text_start = i;
                continue;
            }
            _ => {}
        }

        i = tag.end;
        text_start = i;
    }

    if anchor_depth == 0 && text_start < bytes.len() {
        segments.push(text_start..bytes.len());
    }

    segments
}

/// Whether `<` followed by `next` starts a tag, end tag, comment or
/// declaration rather than a literal less-than sign.
fn opens_markup(next: Option<u8>) -> bool {
    matches!(next, Some(b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

/// One tag, comment or declaration.
struct Tag {
    /// Lowercased element name; `None` for comments and declarations.
    name: Option<String>,
    closing: bool,
    self_closing: bool,
    /// Byte offset just past the closing `>`.
    end: usize,
}

impl Tag {
    /// Parse the markup starting at the `<` at `start`.
    fn parse(html: &str, start: usize) -> Self {
        let rest = &html[start..];

        if rest.starts_with("<!--") {
            let end = rest[4..]
                .find("-->")
                .map_or(html.len(), |p| start + 4 + p + 3);
            return Self {
                name: None,
                closing: false,
                self_closing: false,
                end,
            };
        }

        let bytes = rest.as_bytes();
        let closing = bytes.get(1) == Some(&b'/');
        let name_start = if closing { 2 } else { 1 };
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-')
            .count();
        let name = (name_len > 0 && bytes[1] != b'!' && bytes[1] != b'?')
            .then(|| rest[name_start..name_start + name_len].to_ascii_lowercase());

        let mut quote: Option<u8> = None;
        let mut pos = name_start + name_len;
        while pos < bytes.len() {
            let b = bytes[pos];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b'>' => break,
                None => {}
            }
            pos += 1;
        }

        let self_closing = pos > 0 && pos < bytes.len() && bytes[pos - 1] == b'/';
        Self {
            name,
            closing,
            self_closing,
            end: (start + pos + 1).min(html.len()),
        }
    }
}

/// Offset just past the end tag of a raw-text element such as `<script>`.
fn skip_raw_text(html: &str, from: usize, name: &str) -> usize {
    let closing = format!("</{name}");
    let lower = html[from..].to_ascii_lowercase();
    match lower.find(&closing) {
        Some(p) => Tag::parse(html, from + p).end,
        None => html.len(),
    }
}
