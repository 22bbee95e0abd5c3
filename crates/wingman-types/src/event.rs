//! Items carried from the capture side to the session aggregator.

use serde::{Deserialize, Serialize};

/// Whether a creature came into the room or left it (including by dying).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    Entering,
    Leaving,
}

/// A creature arriving in or leaving the current room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureMovement {
    pub direction: MovementDirection,
    /// Article-prefixed name with a lower-cased first letter, e.g. `a windfang hatchling`.
    pub name: String,
}

impl CreatureMovement {
    pub fn entering(name: impl Into<String>) -> Self {
        Self {
            direction: MovementDirection::Entering,
            name: name.into(),
        }
    }

    pub fn leaving(name: impl Into<String>) -> Self {
        Self {
            direction: MovementDirection::Leaving,
            name: name.into(),
        }
    }
}

/// One entry on the ingest queue, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum IngestItem {
    /// A complete, control-code free line of game text.
    Line(String),
    /// The creatures listed in a fresh room display; replaces the room list wholesale.
    RoomOccupants(Vec<String>),
}

impl IngestItem {
    pub fn line(text: impl Into<String>) -> Self {
        IngestItem::Line(text.into())
    }
}

impl From<&str> for IngestItem {
    fn from(text: &str) -> Self {
        IngestItem::Line(text.to_string())
    }
}

impl From<String> for IngestItem {
    fn from(text: String) -> Self {
        IngestItem::Line(text)
    }
}
