//! In-memory date → events mapping.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use serde_json::Value;

use crate::date_key::DateKey;
use crate::error::YearPlanResult;
use crate::event::{Event, EventId, InitialStatus};
use crate::protocol;
use crate::transition::{self, Control, Outcome};

/// The full date → events mapping, as exchanged with the remote endpoint.
pub type Snapshot = BTreeMap<DateKey, Vec<Event>>;

/// Glyphs longer than this are cut when set.
pub const GLYPH_MAX_CHARS: usize = 2;

/// The session's source of truth for every day's events.
///
/// Days without an entry behave as an empty list. The store only mutates
/// memory; refreshing the heatmap and persisting the day are the caller's job.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    days: BTreeMap<DateKey, Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self, date: &DateKey) -> &[Event] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have an entry, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    pub fn glyph(&self, date: &DateKey) -> &str {
        crate::heatmap::glyph(self.events(date))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.days.clone()
    }

    /// Append a new event. Returns `None` without touching the store when
    /// `text` is blank.
    pub fn add_event(
        &mut self,
        date: DateKey,
        text: &str,
        status: InitialStatus,
    ) -> Option<EventId> {
        self.add_event_at(date, text, status, Utc::now().timestamp_millis())
    }

    fn add_event_at(
        &mut self,
        date: DateKey,
        text: &str,
        status: InitialStatus,
        now_ms: i64,
    ) -> Option<EventId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let list = self.days.entry(date).or_default();
        let id = EventId::Number(fresh_id(list, now_ms));
        list.push(Event::new(id.clone(), text, status.into()));
        Some(id)
    }

    /// Replace the day's glyph, keeping at most [`GLYPH_MAX_CHARS`]
    /// characters. A blank glyph removes it.
    pub fn set_meta(&mut self, date: DateKey, glyph: &str) {
        let list = self.days.entry(date).or_default();
        list.retain(|e| !e.is_meta());

        let glyph: String = glyph.trim().chars().take(GLYPH_MAX_CHARS).collect();
        if !glyph.is_empty() {
            list.push(Event::meta(glyph));
        }
    }

    /// Apply one of the two per-event controls to the event with `id`.
    ///
    /// Returns the outcome, or `None` when there is no such event or the
    /// control has no effect on it (meta events).
    pub fn apply(&mut self, date: &DateKey, id: &EventId, control: Control) -> Option<Outcome> {
        let list = self.days.get_mut(date)?;
        let index = list.iter().position(|e| &e.id == id && !e.is_meta())?;
        let outcome = transition::transition(list[index].status, control)?;

        match outcome {
            Outcome::SetStatus(status) => list[index].status = status,
            Outcome::Destroy => {
                list.remove(index);
            }
        }

        Some(outcome)
    }

    /// Swap in a snapshot loaded from the remote endpoint.
    pub fn replace_all(&mut self, snapshot: Snapshot) {
        self.days = snapshot;
    }

    /// Decode a raw `GET /events` body and swap it in. Malformed days load as
    /// empty lists; only a body that isn't an object is rejected, in which case
    /// the store is left untouched.
    pub fn replace_all_from_json(&mut self, body: Value) -> YearPlanResult<()> {
        let snapshot = protocol::decode_snapshot(body)?;
        self.replace_all(snapshot);
        Ok(())
    }
}

/// Millisecond timestamp, bumped past any numeric id already used that day.
/// If the day already holds `i64::MAX`, the smallest unused non-negative id.
fn fresh_id(list: &[Event], now_ms: i64) -> i64 {
    let used: BTreeSet<i64> = list.iter().filter_map(|e| e.id.as_number()).collect();
    match used.last() {
        Some(&highest) if highest >= now_ms => highest
            .checked_add(1)
            .unwrap_or_else(|| (0..).find(|id| !used.contains(id)).unwrap_or_default()),
        _ => now_ms,
    }
}
