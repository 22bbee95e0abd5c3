//! Read-only session view handed to the presentation layer.

use crate::Character;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of the aggregated session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub total_xp: u64,
    pub xp_per_hour: u64,
    /// Active (unpaused) time as `HH:MM:SS`.
    pub duration: String,
    pub paused: bool,
    /// Roster in arrival order; the first member is the leader.
    pub group: Vec<Character>,
    /// Whether any member is down to a single hit point.
    pub needs_healing: bool,
    pub room: Vec<String>,
}

impl SessionSnapshot {
    pub fn leader(&self) -> Option<&Character> {
        self.group.first()
    }
}
