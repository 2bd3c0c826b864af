//! Events entered for a single day.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved id of the per-day glyph event. Reusing it makes glyph edits
/// replace the previous one instead of piling up.
pub const META_EVENT_ID: &str = "meta-emoji";

/// Event identifier, unique within one day's list.
///
/// Ordinary events use a millisecond timestamp; the glyph event uses
/// [`META_EVENT_ID`]. Other strings are accepted so data written by other
/// clients still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl EventId {
    pub fn meta() -> Self {
        EventId::Text(META_EVENT_ID.to_string())
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            EventId::Number(n) => Some(*n),
            EventId::Text(_) => None,
        }
    }

    /// Parse an id typed by the user: digits become a numeric id.
    pub fn parse(s: &str) -> Self {
        s.trim()
            .parse::<i64>()
            .map(EventId::Number)
            .unwrap_or_else(|_| EventId::Text(s.trim().to_string()))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{n}"),
            EventId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Todo,
    Done,
    Giveup,
    /// The day's glyph. Not counted, not listed, has no controls.
    Meta,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Todo => "todo",
            EventStatus::Done => "done",
            EventStatus::Giveup => "giveup",
            EventStatus::Meta => "meta",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status a new event may be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialStatus {
    Todo,
    Done,
}

impl From<InitialStatus> for EventStatus {
    fn from(status: InitialStatus) -> Self {
        match status {
            InitialStatus::Todo => EventStatus::Todo,
            InitialStatus::Done => EventStatus::Done,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub text: String,
    pub status: EventStatus,
}

impl Event {
    pub fn new(id: EventId, text: impl Into<String>, status: EventStatus) -> Self {
        Event {
            id,
            text: text.into(),
            status,
        }
    }

    /// The glyph event for a day.
    pub fn meta(glyph: impl Into<String>) -> Self {
        Event::new(EventId::meta(), glyph, EventStatus::Meta)
    }

    pub fn is_meta(&self) -> bool {
        self.status == EventStatus::Meta
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
