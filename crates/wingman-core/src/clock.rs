//! Pause-aware session clock.
//!
//! The clock is sampled on demand; nothing here runs on a timer. Every query
//! has an `_at` variant taking the current instant so callers and tests can
//! supply their own time source.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SessionClock {
    started: Instant,
    paused_since: Option<Instant>,
    total_paused: Duration,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self {
            started,
            paused_since: None,
            total_paused: Duration::ZERO,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// No-op when already paused.
    pub fn pause_at(&mut self, now: Instant) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// No-op when running.
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(since) = self.paused_since.take() {
            self.total_paused += now.saturating_duration_since(since);
        }
    }

    pub fn active_duration(&self) -> Duration {
        self.active_duration_at(Instant::now())
    }

    /// Time since the start minus time spent paused. A paused clock stands still.
    pub fn active_duration_at(&self, now: Instant) -> Duration {
        let end = self.paused_since.unwrap_or(now);
        end.saturating_duration_since(self.started)
            .saturating_sub(self.total_paused)
    }

    pub fn duration_string(&self) -> String {
        format_hms(self.active_duration())
    }

    /// Restart from `now`, running.
    pub fn reset_at(&mut self, now: Instant) {
        *self = Self::starting_at(now);
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

/// `HH:MM:SS`, zero padded. Hours are never truncated.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Experience per hour of active time, truncated. Zero under one second of
/// activity or with no experience.
pub fn xp_per_hour(total_xp: u64, active: Duration) -> u64 {
    let secs = active.as_secs_f64();
    if total_xp == 0 || secs < 1.0 {
        return 0;
    }
    (total_xp as f64 / (secs / 3600.0)) as u64
}
