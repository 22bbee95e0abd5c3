//! Transient player conditions.

use serde::{Deserialize, Serialize};

/// Meditation transitions reported by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeditationStatus {
    Began,
    /// The player stood up.
    EndedByStanding,
    /// Meditation stopped on its own because the power pool filled.
    EndedByFullPower,
}

impl MeditationStatus {
    pub fn is_meditating(self) -> bool {
        matches!(self, MeditationStatus::Began)
    }
}

/// Hiding transitions reported by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HidingStatus {
    Hidden,
    /// A repeated hide attempt while already in the shadows.
    AlreadyHidden,
    Revealed,
}

impl HidingStatus {
    pub fn is_hidden(self) -> bool {
        !matches!(self, HidingStatus::Revealed)
    }
}
