//! Group roster entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `current/maximum` pair for hit points, fatigue, or power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBar {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceBar {
    /// Placeholder for members whose vitals have not been reported yet.
    pub const UNKNOWN: ResourceBar = ResourceBar {
        current: -1,
        maximum: -1,
    };

    pub fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    /// Parse the `227/ 394` form used in roster lines.
    pub fn parse(text: &str) -> Option<Self> {
        let (current, maximum) = text.split_once('/')?;
        Some(Self {
            current: current.trim().parse().ok()?,
            maximum: maximum.trim().parse().ok()?,
        })
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }

    /// Fraction of the bar that is filled, or `None` when the maximum is not positive.
    pub fn ratio(&self) -> Option<f64> {
        if self.maximum <= 0 {
            return None;
        }
        Some(self.current as f64 / self.maximum as f64)
    }
}

impl Default for ResourceBar {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for ResourceBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

bitflags::bitflags! {
    /// Ailments shown as single-letter markers in a roster line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        const BLEEDING = 1 << 0;
        const POISONED = 1 << 1;
        const DISEASED = 1 << 2;
        const STUNNED = 1 << 3;
    }
}

impl StatusFlags {
    const MARKERS: [(char, StatusFlags); 4] = [
        ('B', StatusFlags::BLEEDING),
        ('P', StatusFlags::POISONED),
        ('D', StatusFlags::DISEASED),
        ('S', StatusFlags::STUNNED),
    ];

    /// Build flags from a marker run such as `"B P "`. Unknown characters are ignored.
    pub fn from_markers(markers: &str) -> Self {
        markers
            .chars()
            .filter_map(|c| {
                Self::MARKERS
                    .iter()
                    .find(|(marker, _)| *marker == c)
                    .map(|(_, flag)| *flag)
            })
            .fold(StatusFlags::empty(), |acc, flag| acc | flag)
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markers: Vec<String> = Self::MARKERS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(marker, _)| marker.to_string())
            .collect();
        f.write_str(&markers.join(" "))
    }
}

/// One member of the player's group.
///
/// Members are never patched field by field: a fresh roster line produces a
/// new value that supersedes the previous one with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Roster key. Trimmed, case preserved.
    pub name: String,
    /// Class or role token, empty for followers not yet seen in a roster listing.
    pub class: String,
    pub level: Option<u32>,
    pub status: StatusFlags,
    pub hp: ResourceBar,
    pub fatigue: ResourceBar,
    pub power: ResourceBar,
    /// Set only for a name seen via "follows you" before any roster line for it.
    pub is_new_follower: bool,
}

impl Character {
    /// A fully classified member from a roster line.
    pub fn member(
        name: &str,
        class: &str,
        level: u32,
        status: StatusFlags,
        hp: ResourceBar,
        fatigue: ResourceBar,
        power: ResourceBar,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            class: class.trim().to_string(),
            level: Some(level),
            status,
            hp,
            fatigue,
            power,
            is_new_follower: false,
        }
    }

    /// A follower that has announced itself but has not been listed yet.
    pub fn follower(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            class: String::new(),
            level: None,
            status: StatusFlags::empty(),
            hp: ResourceBar::UNKNOWN,
            fatigue: ResourceBar::UNKNOWN,
            power: ResourceBar::UNKNOWN,
            is_new_follower: true,
        }
    }

    pub fn is_classified(&self) -> bool {
        !self.class.is_empty()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
