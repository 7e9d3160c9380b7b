//! Small text helpers shared by the chunker, the linker and the publisher.
//!
//! All lengths are measured in Unicode scalar values (`char`s), never bytes,
//! so a German umlaut counts as one character just like an ASCII letter.

/// Count whitespace-delimited words.
///
/// Runs of whitespace (spaces, tabs, newlines) count as a single separator,
/// so empty and whitespace-only input yield `0`.
///
/// ```rust
/// use interlink::count_words;
///
/// assert_eq!(count_words(""), 0);
/// assert_eq!(count_words("  "), 0);
/// assert_eq!(count_words("Hello\n\n  world"), 2);
/// ```
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length of `text` in characters.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Rough token estimate: one token per four characters, rounded up.
///
/// ```rust
/// use interlink::estimate_tokens;
///
/// assert_eq!(estimate_tokens(""), 0);
/// assert_eq!(estimate_tokens("abc"), 1);
/// assert_eq!(estimate_tokens(&"a".repeat(400)), 100);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    char_count(text).div_ceil(4)
}

/// Build a URL path segment from a title or keyword.
///
/// German umlauts and `ß` are transliterated (`ä` → `ae`, `ß` → `ss`), every
/// run of characters outside `[a-z0-9]` collapses to a single `-`, and
/// leading/trailing hyphens are dropped.
///
/// ```rust
/// use interlink::create_slug;
///
/// assert_eq!(create_slug("Körperkamera für Polizei"), "koerperkamera-fuer-polizei");
/// assert_eq!(create_slug("!@#$%"), "");
/// ```
#[must_use]
pub fn create_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let replacement = match c {
            'ä' => "ae",
            'ö' => "oe",
            'ü' => "ue",
            'ß' => "ss",
            c if c.is_ascii_lowercase() || c.is_ascii_digit() => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
                continue;
            }
            _ => {
                pending_hyphen = true;
                continue;
            }
        };

        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push_str(replacement);
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hello world"), 2);
        assert_eq!(count_words("This is a test sentence."), 5);
        assert_eq!(count_words("Ein deutscher Text mit Umlauten: äöü"), 6);
        assert_eq!(count_words("Hello    world   test"), 3);
        assert_eq!(count_words("Hello\nworld\ntest"), 3);
    }

    #[test]
    fn test_char_count_is_not_bytes() {
        assert_eq!(char_count("äöü"), 3);
        assert_eq!("äöü".len(), 6);
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("Übergrößenträger"), 4);
    }

    #[test]
    fn test_slug_basics() {
        assert_eq!(create_slug("Hello World"), "hello-world");
        assert_eq!(create_slug("hello! world? test."), "hello-world-test");
        assert_eq!(create_slug("hello   world"), "hello-world");
        assert_eq!(create_slug("  hello world  "), "hello-world");
        assert_eq!(create_slug(""), "");
        assert_eq!(create_slug("12345"), "12345");
        assert_eq!(create_slug("Test-123_ABC!"), "test-123-abc");
    }

    #[test]
    fn test_slug_transliterates_german() {
        assert_eq!(create_slug("Käse"), "kaese");
        assert_eq!(create_slug("Öl"), "oel");
        assert_eq!(create_slug("Tür"), "tuer");
        assert_eq!(create_slug("Straße"), "strasse");
        assert_eq!(create_slug("Überwachungskämera"), "ueberwachungskaemera");
        assert_eq!(create_slug("ÜBER"), "ueber");
    }

    #[test]
    fn test_slug_seo_keywords() {
        assert_eq!(create_slug("Body Cam"), "body-cam");
        assert_eq!(create_slug("Überwachungskamera Test"), "ueberwachungskamera-test");
        assert_eq!(create_slug("Dashcam Test 2024"), "dashcam-test-2024");
        assert_eq!(create_slug("Beste Body-Cam Kaufen"), "beste-body-cam-kaufen");
    }
}
