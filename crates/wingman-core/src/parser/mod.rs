//! Recognizers for game text.
//!
//! Every recognizer is a pure, total function: input that does not match
//! yields `None`, `false`, or an empty collection, never an error.
//! [`classify_line`] runs all line-level recognizers over one line in the
//! order the session applies their results.

pub mod effects;
pub mod room;
pub mod roster;
pub mod status;
pub mod xp;

use tracing::trace;
use wingman_types::{
    Character, CreatureMovement, Effect, EffectTransition, HidingStatus, MeditationStatus,
};

/// Drop a leading indefinite article ("A black wolf" -> "black wolf").
pub(crate) fn strip_article(name: &str) -> &str {
    ["A ", "An ", "a ", "an "]
        .iter()
        .find_map(|article| name.strip_prefix(article))
        .map(str::trim_start)
        .unwrap_or(name)
}

/// Lower-case only the first character ("A Troll" -> "a Troll").
pub(crate) fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Session state a line has to be read against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyContext<'a> {
    pub include_creatures: bool,
    /// Name of the current group leader, if any.
    pub leader: Option<&'a str>,
    /// Creatures currently believed to be in the room.
    pub room: &'a [String],
}

/// Everything recognised on one line. Several fields may be set at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEvents {
    pub roster_reset: bool,
    pub members: Vec<Character>,
    pub leaving: Vec<String>,
    pub experience: u64,
    pub away: Option<bool>,
    pub meditation: Option<MeditationStatus>,
    pub hiding: Option<HidingStatus>,
    pub effect: Option<EffectTransition>,
    pub mitigation: Option<Effect>,
    pub player_moved: bool,
    pub creature: Option<CreatureMovement>,
}

impl LineEvents {
    pub fn is_empty(&self) -> bool {
        *self == LineEvents::default()
    }
}

/// Run every line-level recognizer over `line`.
pub fn classify_line(line: &str, ctx: &ClassifyContext<'_>) -> LineEvents {
    let events = LineEvents {
        roster_reset: roster::is_roster_reset(line) || roster::is_leader_disband(line, ctx.leader),
        members: roster::parse_roster(line, ctx.include_creatures),
        leaving: roster::parse_leaving(line),
        experience: xp::parse_experience(line),
        away: status::parse_away(line),
        meditation: status::parse_meditation(line),
        hiding: status::parse_hiding(line),
        effect: effects::parse_effect_transition(line),
        mitigation: effects::parse_mitigation(line),
        player_moved: room::is_player_movement(line),
        creature: room::parse_creature_movement(line, ctx.room),
    };
    if !events.is_empty() {
        trace!(target: "wingman::parser", "{:?} <- {}", events, line);
    }
    events
}
