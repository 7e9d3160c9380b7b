//! Caseless whole-word search restricted to linkable text segments.
//!
//! Both the HTML and the Markdown inserter reduce their input to a list of
//! byte ranges that may receive a link (text outside tags, outside existing
//! links). This module finds the first occurrence of a keyword in those
//! ranges.
//!
//! Case folding compares `char::to_lowercase` per character, so `ÜBER`
//! matches `über` and byte offsets always refer to the original text.
//!
//! ## Whole Words
//!
//! A match is a whole word when the grapheme clusters on either side of it
//! hold no alphanumeric character and no `_`, the same rule as a regex
//! `\b` with Unicode letters:
//!
//! ```text
//! "Camera"       Cam      -> no   (followed by "e")
//! "Dashcam's"    Dashcam  -> yes  (followed by "'")
//! "Dashcam.Das"  Dashcam  -> yes  (followed by ".")
//! "Überwachung"  Über     -> no   (followed by "w")
//! ```
//!
//! Both ends must also fall on grapheme boundaries, so `Cafe` never matches
//! the first four chars of a decomposed `Café`.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// The first whole-word, case-insensitive occurrence of `keyword` inside
/// one of `segments`, as a byte range into `text`.
///
/// Segments are searched in the order given.
pub(crate) fn find_word(
    text: &str,
    segments: &[Range<usize>],
    keyword: &str,
) -> Option<Range<usize>> {
    if keyword.is_empty() {
        return None;
    }

    segments.iter().find_map(|segment| {
        let haystack = &text[segment.clone()];
        find_word_in(haystack, keyword)
            .map(|m| segment.start + m.start..segment.start + m.end)
    })
}

fn find_word_in(haystack: &str, keyword: &str) -> Option<Range<usize>> {
    let mut graphemes: Option<Vec<usize>> = None;

    for (start, _) in haystack.char_indices() {
        let Some(len) = caseless_prefix_len(&haystack[start..], keyword) else {
            continue;
        };
        let end = start + len;
        let bounds = graphemes.get_or_insert_with(|| grapheme_boundaries(haystack));
        if is_whole_word(haystack, bounds, start, end) {
            return Some(start..end);
        }
    }

    None
}

/// Byte length of the prefix of `haystack` that equals `needle` ignoring
/// case, if there is one.
fn caseless_prefix_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if h != n && !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

/// Sorted byte offsets of grapheme cluster boundaries, including both ends.
fn grapheme_boundaries(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds
}

fn is_whole_word(text: &str, bounds: &[usize], start: usize, end: usize) -> bool {
    let (Ok(first), Ok(last)) = (bounds.binary_search(&start), bounds.binary_search(&end)) else {
        return false;
    };

    let before = first.checked_sub(1).map(|prev| &text[bounds[prev]..start]);
    let after = bounds.get(last + 1).map(|&next| &text[end..next]);

    !before.is_some_and(is_word_grapheme) && !after.is_some_and(is_word_grapheme)
}

fn is_word_grapheme(grapheme: &str) -> bool {
    grapheme.chars().any(|c| c.is_alphanumeric() || c == '_')
}
