//! Away, meditation, and hiding recognition.
//!
//! Each family is a small set of fixed phrases. When one input carries more
//! than one phrase of a family, the one printed last wins.

use wingman_types::{HidingStatus, MeditationStatus};

pub const AFK_BEGIN: &str = "You are now AFK.";
pub const AFK_END: &str = "You are no longer AFK.";

pub const MEDITATION_BEGIN: &str = "You sit down and begin to meditate.";
pub const MEDITATION_END_STANDING: &str = "You stop meditating and stand up.";
pub const MEDITATION_END_FULL_POWER: &str = "Your power is fully restored and you stop meditating.";

pub const HIDE_BEGIN: &str = "You attempt to hide in the shadows.";
pub const HIDE_ALREADY: &str = "You are already hidden.";
pub const HIDE_END: &str = "You step out of the shadows.";

/// Value of the phrase that occurs last in `text`.
fn last_phrase<T: Copy>(text: &str, phrases: &[(&str, T)]) -> Option<T> {
    phrases
        .iter()
        .filter_map(|(phrase, value)| text.rfind(phrase).map(|pos| (pos, *value)))
        .max_by_key(|(pos, _)| *pos)
        .map(|(_, value)| value)
}

/// `Some(true)` when the player went AFK, `Some(false)` when they came back.
pub fn parse_away(text: &str) -> Option<bool> {
    last_phrase(text, &[(AFK_BEGIN, true), (AFK_END, false)])
}

pub fn parse_meditation(text: &str) -> Option<MeditationStatus> {
    last_phrase(
        text,
        &[
            (MEDITATION_BEGIN, MeditationStatus::Began),
            (MEDITATION_END_STANDING, MeditationStatus::EndedByStanding),
            (MEDITATION_END_FULL_POWER, MeditationStatus::EndedByFullPower),
        ],
    )
}

pub fn parse_hiding(text: &str) -> Option<HidingStatus> {
    last_phrase(
        text,
        &[
            (HIDE_BEGIN, HidingStatus::Hidden),
            (HIDE_ALREADY, HidingStatus::AlreadyHidden),
            (HIDE_END, HidingStatus::Revealed),
        ],
    )
}
