//! Response sanitizer. Turns raw model output into a bare HTML document.
//!
//! Strips markdown fences and any preamble before the DOCTYPE. Performs no
//! HTML validation or escaping; the result is opaque text.

const DOCTYPE: &str = "<!doctype";
const FENCE: &str = "```";
const HTML_FENCE_TAG: &str = "html";

/// Cleans a raw model response. Idempotent: the single cleaning pass is
/// repeated until it stops changing the text.
pub fn sanitize_response(raw: &str) -> String {
    let mut current = raw;
    loop {
        let next = clean_once(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

/// True when the text opens with a DOCTYPE declaration (any ASCII case).
pub fn has_doctype(html: &str) -> bool {
    starts_with_ignore_case(html, DOCTYPE)
}

/// One cleaning pass. Every step only removes a prefix or suffix, so the
/// output is always a subslice of the input.
fn clean_once(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = if starts_with_ignore_case(rest, HTML_FENCE_TAG) {
            &rest[HTML_FENCE_TAG.len()..]
        } else {
            rest
        };
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    if !has_doctype(text.trim_start()) {
        if let Some(idx) = find_ignore_case(text, DOCTYPE) {
            text = &text[idx..];
        }
    }

    text.trim()
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Byte offset of the first ASCII case-insensitive match of `needle`.
/// `needle` must be ASCII, so the offset is always a char boundary.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOC: &str = "<!DOCTYPE html><html></html>";

    /// Pieces that exercise every branch of the cleaning pass when glued together.
    const FRAGMENTS: &[&str] = &[
        "```", "```html", "```HTML", "```Html\n", "<!DOCTYPE html>", "<!doctype", "<!DOC",
        "<html></html>", "Sure! Here you go:", "\n", " ", "\t", "x", "é", "日本", "`",
    ];

    #[test]
    fn test_strips_html_fence() {
        let raw = "```html\n<!DOCTYPE html><html></html>\n```";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_strips_bare_fence() {
        let raw = "```\n<!DOCTYPE html><html></html>\n```";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_strips_uppercase_fence_tag() {
        let raw = "```HTML\n<!DOCTYPE html><html></html>\n```";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_discards_preamble() {
        let raw = "Sure! Here you go:\n<!DOCTYPE html><html></html>";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_discards_preamble_before_fence() {
        let raw = "Here is your portfolio:\n```html\n<!DOCTYPE html><html></html>\n```\n";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_fence_without_newline() {
        let raw = "```html<!DOCTYPE html><html></html>```";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_lowercase_doctype_after_preamble() {
        let raw = "Output:\n<!doctype html><html></html>";
        assert_eq!(sanitize_response(raw), "<!doctype html><html></html>");
    }

    #[test]
    fn test_clean_document_is_untouched() {
        assert_eq!(sanitize_response(DOC), DOC);
        assert_eq!(
            sanitize_response("<!DOCTYPE html><html><body>Hi</body></html>"),
            "<!DOCTYPE html><html><body>Hi</body></html>"
        );
    }

    #[test]
    fn test_text_without_doctype_is_only_trimmed() {
        assert_eq!(sanitize_response("  <html></html>  "), "<html></html>");
        assert_eq!(sanitize_response("   "), "");
    }

    #[test]
    fn test_nested_fences_collapse_in_one_call() {
        let raw = "```html\n```html\n<!DOCTYPE html><html></html>\n```\n```";
        assert_eq!(sanitize_response(raw), DOC);
    }

    #[test]
    fn test_idempotent_on_awkward_inputs() {
        let inputs = [
            "",
            "```",
            "``````",
            "```html",
            "```html```html x```",
            "text <!DOCTYPE",
            "Preamble\n```\n<!DOCTYPE html>é</html>\n```",
            "ünïcödé before <!DoCtYpE html><html></html> after",
            "   \n```HTML\n\n<!DOCTYPE html>\n<html></html>\n```   ",
            "<!DOCTYPE html>```",
        ];

        for input in inputs {
            let once = sanitize_response(input);
            let twice = sanitize_response(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_has_doctype() {
        assert!(has_doctype(DOC));
        assert!(has_doctype("<!doctype html>"));
        assert!(!has_doctype("<html></html>"));
        assert!(!has_doctype("<!DOC"));
    }

    #[test]
    fn test_find_ignore_case_with_multibyte_prefix() {
        let text = "日本語<!DOCTYPE html>";
        let idx = find_ignore_case(text, DOCTYPE).unwrap();
        assert_eq!(&text[idx..], "<!DOCTYPE html>");
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_fragment_mixes(
            parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..16)
        ) {
            let raw = parts.concat();
            let once = sanitize_response(&raw);
            prop_assert_eq!(sanitize_response(&once), once.clone());
            prop_assert!(raw.contains(once.as_str()));
        }

        #[test]
        fn prop_idempotent_on_arbitrary_text(raw in "\\PC{0,64}") {
            let once = sanitize_response(&raw);
            prop_assert_eq!(sanitize_response(&once), once.clone());
            prop_assert!(raw.contains(once.as_str()));
        }
    }
}
