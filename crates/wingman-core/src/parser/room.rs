//! Room occupancy recognition: player movement, creature movement, and the
//! colour-coded creature listing in a room display.

use super::lower_first;
use once_cell::sync::Lazy;
use regex::Regex;
use wingman_types::CreatureMovement;

/// Marker that introduces the list of entities in a room display.
pub const ROOM_ENTITIES_MARKER: &str = "Also there is";

static PLAYER_MOVEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)obvious exits").expect("Invalid player movement regex"));

static CREATURE_LEAVING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?) (?:dies!|leaves\b|flees\b)").expect("Invalid creature leaving regex")
});

static CREATURE_ENTERING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>(?:A|An) .+?) (?:arrives\b|has arrived\b|enters\b|chases after you\b)")
        .expect("Invalid creature entering regex")
});

/// Creature names are wrapped in red foreground (`ESC[31m`, optionally with a
/// normal or bold prefix). Any other colour is deliberately not matched.
static CREATURE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[(?:[01];)?31m(?P<name>[^\x1b]*)").expect("Invalid creature run regex")
});

/// Whether the player moved into a new room (the room display was printed).
pub fn is_player_movement(text: &str) -> bool {
    PLAYER_MOVEMENT_RE.is_match(text)
}

/// Recognise a creature entering or leaving the room.
///
/// Leaving (death, walking out, fleeing) only counts for a creature already in
/// `room`; unmatched text yields `None`. Entering requires an indefinite
/// article so that players walking in are not mistaken for creatures. Names
/// are compared after lower-casing their first letter only.
pub fn parse_creature_movement(line: &str, room: &[String]) -> Option<CreatureMovement> {
    let line = line.trim();

    if let Some(caps) = CREATURE_LEAVING_RE.captures(line) {
        let name = lower_first(caps["name"].trim());
        if room.iter().any(|occupant| *occupant == name) {
            return Some(CreatureMovement::leaving(name));
        }
    }

    CREATURE_ENTERING_RE
        .captures(line)
        .map(|caps| CreatureMovement::entering(lower_first(caps["name"].trim())))
}

/// Extract the creatures listed in a raw, not yet scrubbed chunk.
///
/// Returns `None` unless the chunk contains [`ROOM_ENTITIES_MARKER`]. Only the
/// rest of the marker's line is inspected.
pub fn parse_room_entities(raw: &str) -> Option<Vec<String>> {
    let marker_pos = raw.find(ROOM_ENTITIES_MARKER)?;
    let listing = &raw[marker_pos + ROOM_ENTITIES_MARKER.len()..];
    let listing = listing.split('\n').next().unwrap_or_default();

    let creatures = CREATURE_RUN_RE
        .captures_iter(listing)
        .map(|caps| {
            caps["name"]
                .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '.')
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .map(|name| lower_first(&name))
        .collect();

    Some(creatures)
}
