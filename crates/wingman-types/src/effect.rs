//! Buff, shield, and resistance effect families.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named effect with paired "starts"/"ends" text markers.
///
/// Adding a family means adding a variant here; every marker table below is an
/// exhaustive match, so the compiler points at each place that needs text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Sanctuary,
    Stoneskin,
    Barkskin,
    Armor,
    Bless,
    Haste,
    Invisibility,
    FireShield,
    IceShield,
    AcidShield,
    LightningShield,
    ResistFire,
    ResistCold,
    ResistPoison,
}

impl Effect {
    pub const ALL: [Effect; 14] = [
        Effect::Sanctuary,
        Effect::Stoneskin,
        Effect::Barkskin,
        Effect::Armor,
        Effect::Bless,
        Effect::Haste,
        Effect::Invisibility,
        Effect::FireShield,
        Effect::IceShield,
        Effect::AcidShield,
        Effect::LightningShield,
        Effect::ResistFire,
        Effect::ResistCold,
        Effect::ResistPoison,
    ];

    /// Text the game prints when the effect is applied.
    pub fn start_marker(self) -> &'static str {
        match self {
            Effect::Sanctuary => "You are surrounded by a white aura.",
            Effect::Stoneskin => "Your skin turns to stone.",
            Effect::Barkskin => "Your skin hardens like bark.",
            Effect::Armor => "You feel someone protecting you.",
            Effect::Bless => "You feel righteous.",
            Effect::Haste => "You feel yourself speed up.",
            Effect::Invisibility => "You fade out of existence.",
            Effect::FireShield => "You are surrounded by a shield of flame.",
            Effect::IceShield => "A shield of ice forms around you.",
            Effect::AcidShield => "A shield of acid envelops you.",
            Effect::LightningShield => "A crackling shield of lightning surrounds you.",
            Effect::ResistFire => "You feel resistant to fire.",
            Effect::ResistCold => "You feel resistant to cold.",
            Effect::ResistPoison => "You feel resistant to poison.",
        }
    }

    /// Text the game prints when the effect wears off.
    pub fn end_marker(self) -> &'static str {
        match self {
            Effect::Sanctuary => "The white aura around your body fades.",
            Effect::Stoneskin => "Your skin feels soft again.",
            Effect::Barkskin => "Your skin loses its barklike texture.",
            Effect::Armor => "You feel less protected.",
            Effect::Bless => "You feel less righteous.",
            Effect::Haste => "You feel yourself slow down.",
            Effect::Invisibility => "You fade back into existence.",
            Effect::FireShield => "The shield of flame around you dies out.",
            Effect::IceShield => "The shield of ice around you melts away.",
            Effect::AcidShield => "The shield of acid around you dissipates.",
            Effect::LightningShield => "The shield of lightning around you fizzles out.",
            Effect::ResistFire => "You no longer feel resistant to fire.",
            Effect::ResistCold => "You no longer feel resistant to cold.",
            Effect::ResistPoison => "You no longer feel resistant to poison.",
        }
    }

    /// Text printed when the effect soaks up incoming damage, if the family has one.
    pub fn mitigation_marker(self) -> Option<&'static str> {
        match self {
            Effect::Sanctuary => Some("Your white aura absorbs part of the blow."),
            Effect::Stoneskin => Some("Your stony skin deflects the blow."),
            Effect::Barkskin => Some("Your bark-hard skin turns the blow."),
            Effect::Armor | Effect::Bless | Effect::Haste | Effect::Invisibility => None,
            Effect::FireShield => Some("Your shield of flame absorbs the heat."),
            Effect::IceShield => Some("Your shield of ice absorbs the cold."),
            Effect::AcidShield => Some("Your shield of acid neutralizes the acid."),
            Effect::LightningShield => Some("Your shield of lightning grounds the shock."),
            Effect::ResistFire => Some("You resist the worst of the flames."),
            Effect::ResistCold => Some("You resist the worst of the cold."),
            Effect::ResistPoison => Some("You resist the worst of the poison."),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Effect::Sanctuary => "Sanctuary",
            Effect::Stoneskin => "Stoneskin",
            Effect::Barkskin => "Barkskin",
            Effect::Armor => "Armor",
            Effect::Bless => "Bless",
            Effect::Haste => "Haste",
            Effect::Invisibility => "Invisibility",
            Effect::FireShield => "Fire shield",
            Effect::IceShield => "Ice shield",
            Effect::AcidShield => "Acid shield",
            Effect::LightningShield => "Lightning shield",
            Effect::ResistFire => "Resist fire",
            Effect::ResistCold => "Resist cold",
            Effect::ResistPoison => "Resist poison",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of inspecting text for an effect's end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "effect", rename_all = "snake_case")]
pub enum EffectTransition {
    /// The effect wore off and was not re-applied in the same input.
    Ended(Effect),
    /// The end marker is followed by the same effect's start marker.
    Refreshing(Effect),
}

impl EffectTransition {
    pub fn effect(&self) -> Effect {
        match self {
            EffectTransition::Ended(effect) | EffectTransition::Refreshing(effect) => *effect,
        }
    }
}
