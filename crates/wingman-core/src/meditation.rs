//! Meditation regeneration tracking.
//!
//! Power regenerates faster the longer the player meditates. The tier shown
//! to the player steps up at fixed thresholds.

use std::fmt;
use std::time::{Duration, Instant};

const TIER_FOUR_AFTER: Duration = Duration::from_secs(32);
const TIER_MAX_AFTER: Duration = Duration::from_secs(64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regeneration {
    Three,
    Four,
    Max,
}

impl Regeneration {
    pub fn after(elapsed: Duration) -> Self {
        if elapsed <= TIER_FOUR_AFTER {
            Regeneration::Three
        } else if elapsed <= TIER_MAX_AFTER {
            Regeneration::Four
        } else {
            Regeneration::Max
        }
    }
}

impl fmt::Display for Regeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regeneration::Three => f.write_str("3"),
            Regeneration::Four => f.write_str("4"),
            Regeneration::Max => f.write_str("Max"),
        }
    }
}

/// Started when the player sits down to meditate.
#[derive(Debug, Clone, Copy)]
pub struct MeditationTimer {
    started: Instant,
}

impl MeditationTimer {
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whole seconds, so 32.9 s still counts as tier 3.
    pub fn regeneration_at(&self, now: Instant) -> Regeneration {
        let whole_secs = now.saturating_duration_since(self.started).as_secs();
        Regeneration::after(Duration::from_secs(whole_secs))
    }

    pub fn regeneration(&self) -> Regeneration {
        self.regeneration_at(Instant::now())
    }
}

/// "Med: 3", "Med: 4", or "Med: Max".
impl fmt::Display for MeditationTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Med: {}", self.regeneration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        let t0 = Instant::now();
        let timer = MeditationTimer::started_at(t0);
        let at = |s: u64| timer.regeneration_at(t0 + Duration::from_secs(s));
        assert_eq!(at(0), Regeneration::Three);
        assert_eq!(at(32), Regeneration::Three);
        assert_eq!(at(33), Regeneration::Four);
        assert_eq!(at(64), Regeneration::Four);
        assert_eq!(at(65), Regeneration::Max);
        assert_eq!(
            timer.regeneration_at(t0 + Duration::from_millis(32_900)),
            Regeneration::Three
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(MeditationTimer::start().to_string(), "Med: 3");
        assert_eq!(Regeneration::Max.to_string(), "Max");
    }
}
