//! Terminal colour/style code removal.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// SGR sequences (`ESC[...m`). Cursor movement and other escapes are left alone.
static SGR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));

/// Strip colour and style escape sequences from `text`.
///
/// Unrecognised or truncated escapes (for example one split across two network
/// chunks) pass through unchanged. The result is a fixed point: stripping it
/// again changes nothing.
pub fn strip(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }

    let mut current = SGR_RE.replace_all(text, "");
    // Removing one sequence can join the halves of another, e.g. "\x1b\x1b[0m[1m".
    while SGR_RE.is_match(&current) {
        let next = SGR_RE.replace_all(&current, "").into_owned();
        current = Cow::Owned(next);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes() {
        let input = "\x1b[31mA greater mummy attacks you!\x1b[0m";
        assert_eq!(strip(input), "A greater mummy attacks you!");
    }

    #[test]
    fn test_strip_mid_string_codes() {
        let input = "You gain \x1b[1m100\x1b[0m experience.";
        assert_eq!(strip(input), "You gain 100 experience.");
    }

    #[test]
    fn test_strip_compound_sgr() {
        assert_eq!(strip("\x1b[1;33;40mgold\x1b[m"), "gold");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(strip("no escapes here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncated_escape_passes_through() {
        assert_eq!(strip("hp: \x1b[3"), "hp: \x1b[3");
        assert_eq!(strip("\x1b[2J clear"), "\x1b[2J clear");
    }

    #[test]
    fn test_strip_is_idempotent_on_spliced_sequences() {
        let once = strip("a\x1b\x1b[0m[1mb");
        assert_eq!(once, "ab");
        assert_eq!(strip(&once), once);
    }
}
