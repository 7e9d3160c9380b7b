//! Internal link insertion for Markdown.
//!
//! Text already inside link syntax is left alone: the `[...]` label, the
//! `(...)` destination that follows it, `<...>` autolinks, bare
//! `http://`/`https://` URLs and inline code spans.
//!
//! ```text
//! See [Body Cam](/old) and `Body Cam` or Body Cam.
//!      ^^^^^^^^^^^^^^^^     ^^^^^^^^^^    ^^^^^^^^
//!      protected            protected     linked
//!
//! https://shop.de/body-cam
//! ^^^^^^^^^^^^^^^^^^^^^^^^ protected
//! ```

use std::ops::Range;

use tracing::debug;

use crate::scan::find_word;
use crate::InternalLink;

/// Link the first free occurrence of each keyword in `markdown`.
///
/// The inserted label is the link's keyword in catalog casing, followed by
/// the target URL and a quoted title.
///
/// ```rust
/// use interlink::{insert_links_into_markdown, InternalLink};
///
/// let link = InternalLink {
///     keyword: "Body Cam".into(),
///     target_slug: "body-cam".into(),
///     target_title: "Body Cam Ratgeber".into(),
///     target_url: "/body-cam".into(),
///     language: "de".into(),
/// };
///
/// let md = insert_links_into_markdown("Body Cam ist gut. Body Cam ist toll.", &[link]);
/// assert_eq!(md, "[Body Cam](/body-cam \"Body Cam Ratgeber\") ist gut. Body Cam ist toll.");
/// ```
#[must_use]
pub fn insert_links_into_markdown(markdown: &str, links: &[InternalLink]) -> String {
    let mut linked = markdown.to_string();
    let mut inserted = 0;

    for link in links {
        let segments = linkable_text(&linked);
        let Some(found) = find_word(&linked, &segments, &link.keyword) else {
            continue;
        };

        let replacement = format!(
            r#"[{}]({} "{}")"#,
            link.keyword,
            link.target_url,
            link.target_title.replace('"', "\\\"")
        );
        linked.replace_range(found, &replacement);
        inserted += 1;
    }

    debug!(
        inserted,
        skipped = links.len() - inserted,
        "inserted internal links into Markdown"
    );
    linked
}

/// Byte ranges outside link labels, link destinations and code spans.
fn linkable_text(markdown: &str) -> Vec<Range<usize>> {
    let bytes = markdown.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let protected_end = match bytes[i] {
            b'[' => closing(bytes, i, b'[', b']').map(|end| {
                if bytes.get(end) == Some(&b'(') {
                    closing(bytes, end, b'(', b')').unwrap_or(end)
                } else {
                    end
                }
            }),
            b'`' => bytes[i + 1..]
                .iter()
                .position(|&b| b == b'`')
                .map(|p| i + 1 + p + 1),
            b'<' => autolink_end(markdown, i),
            b'h' => bare_url_end(markdown, i),
            _ => None,
        };

        match protected_end {
            Some(end) => {
                if i > text_start {
                    segments.push(text_start..i);
                }
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }

    if text_start < bytes.len() {
        segments.push(text_start..bytes.len());
    }

    segments
}

/// Offset just past a `<scheme:...>` or `<user@host>` autolink at `start`.
fn autolink_end(markdown: &str, start: usize) -> Option<usize> {
    let rest = &markdown[start + 1..];
    let close = rest.find('>')?;
    let inner = &rest[..close];
    let is_autolink = !inner.is_empty()
        && !inner.contains(char::is_whitespace)
        && inner.contains([':', '@']);
    is_autolink.then_some(start + 1 + close + 1)
}

/// Offset just past a bare `http(s)://` URL at `start`.
fn bare_url_end(markdown: &str, start: usize) -> Option<usize> {
    let rest = &markdown[start..];
    if !rest.starts_with("http://") && !rest.starts_with("https://") {
        return None;
    }
    let len = rest
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(rest.len());
    Some(start + len)
}

/// Offset just past the delimiter matching the `open` at `start`.
fn closing(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + offset + 1);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(keyword: &str) -> InternalLink {
        InternalLink {
            keyword: keyword.into(),
            target_slug: "t".into(),
            target_title: "Titel".into(),
            target_url: "/t".into(),
            language: "de".into(),
        }
    }

    #[test]
    fn test_segments() {
        let md = "A [B](/c) D `E` F [G] H";
        let segments: Vec<_> = linkable_text(md).into_iter().map(|r| &md[r]).collect();
        assert_eq!(segments, vec!["A ", " D ", " F ", " H"]);
    }

    #[test]
    fn test_urls_are_protected() {
        let md = "A https://x.de/cam B <https://y.de> C <b> D";
        let segments: Vec<_> = linkable_text(md).into_iter().map(|r| &md[r]).collect();
        assert_eq!(segments, vec!["A ", " B ", " C <b> D"]);
    }

    #[test]
    fn test_skips_bare_url() {
        let md = "Siehe https://shop.de/cam und die Cam.";
        let out = insert_links_into_markdown(md, &[link("Cam")]);
        assert_eq!(out, r#"Siehe https://shop.de/cam und die [Cam](/t "Titel")."#);
    }

    #[test]
    fn test_unbalanced_bracket_is_text() {
        let md = "Preis [ca. 20 Euro";
        assert_eq!(linkable_text(md), vec![0..md.len()]);
    }

    #[test]
    fn test_skips_existing_link() {
        let md = "[Body Cam](/old) und Body Cam";
        let out = insert_links_into_markdown(md, &[link("Body Cam")]);
        assert_eq!(out, r#"[Body Cam](/old) und [Body Cam](/t "Titel")"#);
    }

    #[test]
    fn test_skips_code_span() {
        let md = "`Body Cam` und body cam";
        let out = insert_links_into_markdown(md, &[link("Body Cam")]);
        assert_eq!(out, r#"`Body Cam` und [Body Cam](/t "Titel")"#);
    }

    #[test]
    fn test_whole_word_only() {
        let md = "Die Camera";
        assert_eq!(insert_links_into_markdown(md, &[link("Cam")]), md);
    }

    #[test]
    fn test_quote_in_title_escaped() {
        let mut l = link("Cam");
        l.target_title = r#"Die "beste" Cam"#.into();
        let out = insert_links_into_markdown("Cam", &[l]);
        assert_eq!(out, r#"[Cam](/t "Die \"beste\" Cam")"#);
    }
}
