//! Experience gain recognition.

use once_cell::sync::Lazy;
use regex::Regex;

/// "You gain 17325 (+43312) experience points." The bonus part is optional.
static XP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)you gain\s+(\d+)(?:\s+\(\+(\d+)\))?.*?experience").expect("Invalid XP regex")
});

/// Sum every experience gain reported in `text`.
///
/// A block can report several kills at once, so all occurrences count.
/// Returns 0 when nothing matches.
pub fn parse_experience(text: &str) -> u64 {
    XP_RE
        .captures_iter(text)
        .map(|caps| {
            let base: u64 = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
            let bonus: u64 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
            base.saturating_add(bonus)
        })
        .fold(0u64, u64::saturating_add)
}
