//! Session aggregator.
//!
//! Owns everything derived from the stream: experience, the session clock,
//! the group roster, the room occupants, and the single-shot signals the
//! display side reads once per tick. It is driven from one thread by
//! [`Session::drain_and_apply`], which never blocks.

use crate::clock::{self, SessionClock};
use crate::group::Group;
use crate::ingest::IngestReceiver;
use crate::meditation::MeditationTimer;
use crate::parser::{classify_line, ClassifyContext, LineEvents};
use crate::room::RoomOccupants;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, warn};
use wingman_types::{
    Effect, EffectTransition, HidingStatus, IngestItem, MeditationStatus, MovementDirection,
    SessionSnapshot,
};

/// Effect endings kept until the display side reads them.
const PENDING_ENDINGS_CAPACITY: usize = 8;

/// Knobs that change how lines are interpreted.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Keep pets and charmed creatures listed in the group roster.
    pub include_creatures: bool,
}

pub struct Session {
    receiver: IngestReceiver,
    options: SessionOptions,
    clock: SessionClock,
    total_xp: u64,
    group: Group,
    /// Roster last handed out by [`Session::take_group_if_changed`].
    shown_group: Group,
    room: RoomOccupants,
    away: Option<bool>,
    meditation: Option<MeditationStatus>,
    meditation_timer: Option<MeditationTimer>,
    hiding: Option<HidingStatus>,
    pending_endings: VecDeque<Effect>,
    mitigation: Option<Effect>,
}

impl Session {
    pub fn new(receiver: IngestReceiver) -> Self {
        Self::with_options(receiver, SessionOptions::default())
    }

    pub fn with_options(receiver: IngestReceiver, options: SessionOptions) -> Self {
        Self {
            receiver,
            options,
            clock: SessionClock::new(),
            total_xp: 0,
            group: Group::new(),
            shown_group: Group::new(),
            room: RoomOccupants::new(),
            away: None,
            meditation: None,
            meditation_timer: None,
            hiding: None,
            pending_endings: VecDeque::with_capacity(PENDING_ENDINGS_CAPACITY),
            mitigation: None,
        }
    }

    /// Apply everything currently queued. Returns the log entries produced.
    pub fn drain_and_apply(&mut self) -> Vec<String> {
        let items = self.receiver.drain();
        let mut log = Vec::new();
        for item in items {
            log.extend(self.apply(item));
        }
        log
    }

    /// Apply one queued item and return its log entries.
    pub fn apply(&mut self, item: IngestItem) -> Vec<String> {
        match item {
            IngestItem::Line(line) => self.apply_line(&line),
            IngestItem::RoomOccupants(creatures) => {
                debug!(target: "wingman::room", "Room replaced: {:?}", creatures);
                self.room.replace(creatures);
                Vec::new()
            }
        }
    }

    fn apply_line(&mut self, line: &str) -> Vec<String> {
        let events = {
            let ctx = ClassifyContext {
                include_creatures: self.options.include_creatures,
                leader: self.group.leader().map(|m| m.name.as_str()),
                room: self.room.as_slice(),
            };
            classify_line(line, &ctx)
        };
        if events.is_empty() {
            return Vec::new();
        }

        let LineEvents {
            roster_reset,
            members,
            leaving,
            experience,
            away,
            meditation,
            hiding,
            effect,
            mitigation,
            player_moved,
            creature,
        } = events;
        let mut log = Vec::new();

        if roster_reset {
            debug!(target: "wingman::session", "Roster reset ({} member(s) dropped)", self.group.len());
            self.group.disband();
        }

        for member in members {
            if member.is_new_follower {
                if !self.group.contains(&member.name) {
                    debug!(target: "wingman::session", "New follower: {}", member.name);
                    self.group.add_members([member]);
                }
            } else {
                self.group.upsert(member);
            }
        }

        if !leaving.is_empty() {
            let removed = self.group.remove_named(&leaving);
            debug!(target: "wingman::session", "Left the group: {:?} ({} removed)", leaving, removed);
        }

        if experience > 0 {
            self.total_xp = self.total_xp.saturating_add(experience);
            info!(target: "wingman::session", "+{} XP (total {})", experience, self.total_xp);
            log.push(format!(
                "[{}] +{} XP",
                chrono::Local::now().format("%H:%M:%S"),
                experience
            ));
        }

        if away.is_some() {
            self.away = away;
        }
        if let Some(status) = meditation {
            self.meditation = Some(status);
            self.meditation_timer = status.is_meditating().then(MeditationTimer::start);
        }
        if hiding.is_some() {
            self.hiding = hiding;
        }

        match effect {
            Some(EffectTransition::Ended(effect)) => self.push_ending(effect),
            Some(EffectTransition::Refreshing(effect)) => {
                debug!(target: "wingman::session", "{} refreshed", effect);
            }
            None => {}
        }
        if mitigation.is_some() {
            self.mitigation = mitigation;
        }

        if player_moved {
            debug!(target: "wingman::room", "Player moved, room cleared");
            self.room.clear();
        }
        if let Some(movement) = creature {
            match movement.direction {
                MovementDirection::Entering => {
                    debug!(target: "wingman::room", "{} entered", movement.name);
                    self.room.add(movement.name);
                }
                MovementDirection::Leaving => {
                    debug!(target: "wingman::room", "{} left", movement.name);
                    self.room.remove_first(&movement.name);
                }
            }
        }

        log
    }

    fn push_ending(&mut self, effect: Effect) {
        if self.pending_endings.len() == PENDING_ENDINGS_CAPACITY {
            if let Some(dropped) = self.pending_endings.pop_front() {
                warn!(target: "wingman::session", "Dropping unread ending of {}", dropped);
            }
        }
        self.pending_endings.push_back(effect);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Zero experience, restart the clock running, and disband the roster.
    pub fn reset(&mut self) {
        self.total_xp = 0;
        self.clock.reset();
        self.group.disband();
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn xp_per_hour(&self) -> u64 {
        clock::xp_per_hour(self.total_xp, self.clock.active_duration())
    }

    pub fn active_duration(&self) -> Duration {
        self.clock.active_duration()
    }

    pub fn duration_string(&self) -> String {
        self.clock.duration_string()
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn room(&self) -> &RoomOccupants {
        &self.room
    }

    pub fn meditation_timer(&self) -> Option<&MeditationTimer> {
        self.meditation_timer.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let active = self.clock.active_duration();
        SessionSnapshot {
            total_xp: self.total_xp,
            xp_per_hour: clock::xp_per_hour(self.total_xp, active),
            duration: clock::format_hms(active),
            paused: self.clock.is_paused(),
            group: self.group.members().to_vec(),
            needs_healing: self.group.needs_healing(),
            room: self.room.as_slice().to_vec(),
        }
    }

    pub fn take_away_status(&mut self) -> Option<bool> {
        self.away.take()
    }

    pub fn take_meditation_status(&mut self) -> Option<MeditationStatus> {
        self.meditation.take()
    }

    pub fn take_hiding_status(&mut self) -> Option<HidingStatus> {
        self.hiding.take()
    }

    /// Oldest effect ending not yet read.
    pub fn take_effect_ending(&mut self) -> Option<Effect> {
        self.pending_endings.pop_front()
    }

    pub fn take_mitigation(&mut self) -> Option<Effect> {
        self.mitigation.take()
    }

    /// The roster, if it differs by value from the one last returned here.
    pub fn take_group_if_changed(&mut self) -> Option<Group> {
        if self.group == self.shown_group {
            return None;
        }
        self.shown_group = self.group.clone();
        Some(self.group.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest_queue, IngestSender};

    const EARTHQUACK: &str = "[Orc            40]  B        Earthquack           227/ 394 ( 57%)     354/ 394 ( 89%)     326/ 326 (100%)";
    const BIG: &str = "[Kenku          70]           Big                  550/ 550 (100%)     538/ 550 ( 97%)      63/  73 ( 86%)";

    fn session() -> (IngestSender, Session) {
        let (tx, rx) = ingest_queue();
        (tx, Session::new(rx))
    }

    fn feed(tx: &IngestSender, session: &mut Session, lines: &[&str]) -> Vec<String> {
        for line in lines {
            tx.push(*line).unwrap();
        }
        session.drain_and_apply()
    }

    #[test]
    fn test_roster_reset_then_rebuild_then_disband() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &["Earthquack's group:", EARTHQUACK, BIG]);
        assert_eq!(s.group().len(), 2);
        assert_eq!(s.group().leader().map(|m| m.name.as_str()), Some("Earthquack"));

        feed(&tx, &mut s, &["You disband from the group."]);
        assert!(s.group().is_empty());
    }

    #[test]
    fn test_header_replaces_previous_roster() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[BIG]);
        feed(&tx, &mut s, &["Earthquack's group:", EARTHQUACK]);
        assert_eq!(s.group().len(), 1);
        assert!(s.group().contains("Earthquack"));
    }

    #[test]
    fn test_repeated_roster_line_updates_in_place() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[EARTHQUACK, BIG, EARTHQUACK]);
        assert_eq!(s.group().len(), 2);
    }

    #[test]
    fn test_follower_join_then_leave_restores_count() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[EARTHQUACK]);
        feed(&tx, &mut s, &["A black wolf follows you."]);
        assert_eq!(s.group().len(), 2);
        feed(&tx, &mut s, &["A black wolf disbands from your group."]);
        assert_eq!(s.group().len(), 1);
    }

    #[test]
    fn test_follower_not_duplicated() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &["FooBar follows you", "FooBar follows you"]);
        assert_eq!(s.group().len(), 1);
    }

    #[test]
    fn test_leader_disband() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[EARTHQUACK, BIG]);
        feed(&tx, &mut s, &["Big disbanded their group."]);
        assert_eq!(s.group().len(), 2);
        feed(&tx, &mut s, &["Earthquack disbanded their group."]);
        assert!(s.group().is_empty());
    }

    #[test]
    fn test_experience_accumulates_and_logs() {
        let (tx, mut s) = session();
        let log = feed(
            &tx,
            &mut s,
            &[
                "You gain 17325 (+43312) experience points.",
                "You gain 150 experience points.",
            ],
        );
        assert_eq!(s.total_xp(), 60787);
        assert_eq!(log.len(), 2);
        assert!(log[0].ends_with("] +60637 XP"), "{}", log[0]);
    }

    #[test]
    fn test_status_signals_are_single_shot() {
        let (tx, mut s) = session();
        feed(
            &tx,
            &mut s,
            &[
                "You are now AFK.",
                "You sit down and begin to meditate.",
                "You attempt to hide in the shadows.",
            ],
        );
        assert_eq!(s.take_away_status(), Some(true));
        assert_eq!(s.take_away_status(), None);
        assert_eq!(s.take_meditation_status(), Some(MeditationStatus::Began));
        assert!(s.meditation_timer().is_some());
        assert_eq!(s.take_hiding_status(), Some(HidingStatus::Hidden));
        assert_eq!(s.take_hiding_status(), None);

        feed(&tx, &mut s, &["Your power is fully restored and you stop meditating."]);
        assert_eq!(s.take_meditation_status(), Some(MeditationStatus::EndedByFullPower));
        assert!(s.meditation_timer().is_none());
    }

    #[test]
    fn test_effect_endings_queue_in_order() {
        let (tx, mut s) = session();
        feed(
            &tx,
            &mut s,
            &[Effect::Haste.end_marker(), Effect::Sanctuary.end_marker()],
        );
        assert_eq!(s.take_effect_ending(), Some(Effect::Haste));
        assert_eq!(s.take_effect_ending(), Some(Effect::Sanctuary));
        assert_eq!(s.take_effect_ending(), None);
    }

    #[test]
    fn test_effect_endings_drop_oldest_when_full() {
        let (tx, mut s) = session();
        let mut lines = vec![Effect::Haste.end_marker()];
        lines.extend(std::iter::repeat_n(Effect::Bless.end_marker(), PENDING_ENDINGS_CAPACITY));
        feed(&tx, &mut s, &lines);

        let endings: Vec<Effect> = std::iter::from_fn(|| s.take_effect_ending()).collect();
        assert_eq!(endings.len(), PENDING_ENDINGS_CAPACITY);
        assert!(endings.iter().all(|e| *e == Effect::Bless));
    }

    #[test]
    fn test_mitigation_signal() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &["Your stony skin deflects the blow."]);
        assert_eq!(s.take_mitigation(), Some(Effect::Stoneskin));
        assert_eq!(s.take_mitigation(), None);
    }

    #[test]
    fn test_room_movement() {
        let (tx, mut s) = session();
        tx.push(IngestItem::RoomOccupants(vec!["an orc".into(), "a troll".into()]))
            .unwrap();
        feed(&tx, &mut s, &["A wolf arrives from the north."]);
        assert_eq!(s.room().as_slice(), ["an orc", "a troll", "a wolf"]);

        feed(&tx, &mut s, &["A goblin dies!"]);
        assert_eq!(s.room().len(), 3);

        feed(&tx, &mut s, &["An orc dies!"]);
        assert_eq!(s.room().as_slice(), ["a troll", "a wolf"]);

        feed(&tx, &mut s, &["Obvious exits: north, south."]);
        assert!(s.room().is_empty());
    }

    #[test]
    fn test_take_group_if_changed() {
        let (tx, mut s) = session();
        assert!(s.take_group_if_changed().is_none());

        feed(&tx, &mut s, &[EARTHQUACK]);
        assert_eq!(s.take_group_if_changed().map(|g| g.len()), Some(1));
        assert!(s.take_group_if_changed().is_none());

        feed(&tx, &mut s, &[EARTHQUACK]);
        assert!(s.take_group_if_changed().is_none());
    }

    #[test]
    fn test_reset() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[EARTHQUACK, "You gain 10 experience points."]);
        s.pause();
        s.reset();
        assert_eq!(s.total_xp(), 0);
        assert!(s.group().is_empty());
        assert!(!s.is_paused());
        assert_eq!(s.xp_per_hour(), 0);
    }

    #[test]
    fn test_snapshot() {
        let (tx, mut s) = session();
        feed(&tx, &mut s, &[EARTHQUACK, "You gain 10 experience points."]);
        s.pause();
        let snapshot = s.snapshot();
        assert_eq!(snapshot.total_xp, 10);
        assert!(snapshot.paused);
        assert_eq!(snapshot.duration, "00:00:00");
        assert_eq!(snapshot.leader().map(|m| m.name.as_str()), Some("Earthquack"));
        assert!(!snapshot.needs_healing);
    }

    #[test]
    fn test_drain_on_empty_queue_is_harmless() {
        let (_tx, mut s) = session();
        assert!(s.drain_and_apply().is_empty());
        assert!(s.drain_and_apply().is_empty());
    }
}
