//! Plain text and JSON views of a session.

use anyhow::Result;
use std::fmt::Write as _;
use tracing::warn;
use wingman_core::{HealthBand, Session};
use wingman_types::{Character, Effect, HidingStatus, MeditationStatus, SessionSnapshot};

/// Snapshot with the room narrowed to creatures not on the ignore list.
pub fn visible_snapshot(session: &Session, ignored: &[String]) -> SessionSnapshot {
    let mut snapshot = session.snapshot();
    snapshot.room = session
        .room()
        .visible(ignored)
        .into_iter()
        .map(str::to_string)
        .collect();
    snapshot
}

pub fn render_json(snapshot: &SessionSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn render_text(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "XP: {} ({}/h) in {}",
        snapshot.total_xp, snapshot.xp_per_hour, snapshot.duration
    );
    if snapshot.paused {
        out.push_str(" [paused]");
    }
    out.push('\n');

    if snapshot.group.is_empty() {
        out.push_str("Group: none\n");
    } else {
        out.push_str("Group:\n");
        for member in &snapshot.group {
            let _ = writeln!(out, "  {}", member_line(member));
        }
        if snapshot.needs_healing {
            out.push_str("  Heal!\n");
        }
    }

    if snapshot.room.is_empty() {
        out.push_str("Room: empty\n");
    } else {
        let _ = writeln!(out, "Room: {}", snapshot.room.join(", "));
    }

    out
}

fn member_line(member: &Character) -> String {
    if !member.is_classified() {
        return format!("{} (new follower)", member.name);
    }

    let band = match HealthBand::of(member) {
        Ok(band) => band.label(),
        Err(e) => {
            warn!(target: "wingman::session", "{}", e);
            "?"
        }
    };
    let level = member.level.map(|l| l.to_string()).unwrap_or_default();

    let mut line = format!(
        "{:<16} {:<10} {:>3}  hp {:>9} [{}]  fat {:>9}  pwr {:>9}",
        member.name,
        member.class,
        level,
        member.hp.to_string(),
        band,
        member.fatigue.to_string(),
        member.power.to_string()
    );
    if !member.status.is_empty() {
        let _ = write!(line, "  {}", member.status);
    }
    line
}

pub fn describe_away(away: bool) -> &'static str {
    if away { "You are AFK" } else { "You are back" }
}

pub fn describe_meditation(status: MeditationStatus) -> &'static str {
    match status {
        MeditationStatus::Began => "Meditating",
        MeditationStatus::EndedByStanding => "Stopped meditating",
        MeditationStatus::EndedByFullPower => "Power full, stopped meditating",
    }
}

pub fn describe_hiding(status: HidingStatus) -> &'static str {
    match status {
        HidingStatus::Hidden => "Hidden",
        HidingStatus::AlreadyHidden => "Already hidden",
        HidingStatus::Revealed => "Visible",
    }
}

pub fn describe_ending(effect: Effect) -> String {
    format!("{} has worn off", effect.label())
}

pub fn describe_mitigation(effect: Effect) -> String {
    format!("{} absorbed a hit", effect.label())
}

/// Read every single-shot signal once and describe it.
pub fn drain_signals(session: &mut Session) -> Vec<String> {
    let mut signals = Vec::new();
    if let Some(away) = session.take_away_status() {
        signals.push(describe_away(away).to_string());
    }
    if let Some(status) = session.take_meditation_status() {
        signals.push(describe_meditation(status).to_string());
    }
    if let Some(status) = session.take_hiding_status() {
        signals.push(describe_hiding(status).to_string());
    }
    while let Some(effect) = session.take_effect_ending() {
        signals.push(describe_ending(effect));
    }
    if let Some(effect) = session.take_mitigation() {
        signals.push(describe_mitigation(effect));
    }
    signals
}
