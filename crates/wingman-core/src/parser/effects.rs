//! Buff and shield transitions, refresh detection, and mitigation notices.

use std::ops::Range;
use wingman_types::{Effect, EffectTransition};

/// Earliest effect end marker in `text` and whether its start marker follows it.
pub fn parse_effect_transition(text: &str) -> Option<EffectTransition> {
    Effect::ALL
        .iter()
        .filter_map(|&effect| {
            let end_marker = effect.end_marker();
            let end_pos = text.find(end_marker)?;
            let after_end = &text[end_pos + end_marker.len()..];
            let transition = if after_end.contains(effect.start_marker()) {
                EffectTransition::Refreshing(effect)
            } else {
                EffectTransition::Ended(effect)
            };
            Some((end_pos, transition))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, transition)| transition)
}

/// The effect whose mitigation notice appears first in `text`.
pub fn parse_mitigation(text: &str) -> Option<Effect> {
    Effect::ALL
        .iter()
        .filter_map(|&effect| {
            let marker = effect.mitigation_marker()?;
            text.find(marker).map(|pos| (pos, effect))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, effect)| effect)
}

/// Byte range covering the earliest refresh in `text`: from an end marker
/// through the same effect's next start marker and that line's terminator.
pub fn refresh_window(text: &str) -> Option<(Effect, Range<usize>)> {
    Effect::ALL
        .iter()
        .filter_map(|&effect| {
            let end_marker = effect.end_marker();
            let start_marker = effect.start_marker();

            let end_pos = text.find(end_marker)?;
            let search_from = end_pos + end_marker.len();
            let start_pos = search_from + text[search_from..].find(start_marker)?;

            let mut window_end = start_pos + start_marker.len();
            let tail = &text[window_end..];
            if tail.starts_with("\r\n") {
                window_end += 2;
            } else if tail.starts_with('\n') {
                window_end += 1;
            }
            Some((effect, end_pos..window_end))
        })
        .min_by_key(|(_, window)| window.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_marker_alone_is_ended() {
        for effect in Effect::ALL {
            assert_eq!(
                parse_effect_transition(effect.end_marker()),
                Some(EffectTransition::Ended(effect)),
                "{effect}"
            );
        }
    }

    #[test]
    fn test_end_then_start_is_refreshing() {
        let text = format!(
            "{}\r\n{}\r\n",
            Effect::Sanctuary.end_marker(),
            Effect::Sanctuary.start_marker()
        );
        assert_eq!(
            parse_effect_transition(&text),
            Some(EffectTransition::Refreshing(Effect::Sanctuary))
        );
    }

    #[test]
    fn test_start_of_other_effect_does_not_refresh() {
        let text = format!(
            "{}\n{}\n",
            Effect::Sanctuary.end_marker(),
            Effect::Haste.start_marker()
        );
        assert_eq!(
            parse_effect_transition(&text),
            Some(EffectTransition::Ended(Effect::Sanctuary))
        );
    }

    #[test]
    fn test_start_marker_alone_is_not_applicable() {
        assert_eq!(parse_effect_transition(Effect::Stoneskin.start_marker()), None);
        assert_eq!(parse_effect_transition("You feel hungry."), None);
    }

    #[test]
    fn test_parse_mitigation() {
        assert_eq!(
            parse_mitigation("Your shield of flame absorbs the heat."),
            Some(Effect::FireShield)
        );
        assert_eq!(parse_mitigation("You resist the worst of the cold."), Some(Effect::ResistCold));
        assert_eq!(parse_mitigation("The troll hits you."), None);
    }

    #[test]
    fn test_refresh_window_covers_markers_and_terminator() {
        let end = Effect::IceShield.end_marker();
        let start = Effect::IceShield.start_marker();
        let text = format!("pre\r\n{end}\r\n{start}\r\npost\r\n");

        let (effect, window) = refresh_window(&text).unwrap();
        assert_eq!(effect, Effect::IceShield);
        assert_eq!(&text[..window.start], "pre\r\n");
        assert_eq!(&text[window.end..], "post\r\n");
    }

    #[test]
    fn test_refresh_window_requires_start_after_end() {
        let text = format!(
            "{}\n{}",
            Effect::Armor.start_marker(),
            Effect::Armor.end_marker()
        );
        assert_eq!(refresh_window(&text), None);
    }

    #[test]
    fn test_refresh_window_at_end_of_chunk_without_newline() {
        let end = Effect::Bless.end_marker();
        let start = Effect::Bless.start_marker();
        let text = format!("{end}\n{start}");
        let (_, window) = refresh_window(&text).unwrap();
        assert_eq!(window, 0..text.len());
    }
}
