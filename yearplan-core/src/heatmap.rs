//! Projection of one day's events onto a heatmap cell.

use serde::Serialize;

use crate::event::{Event, EventStatus};

/// Heat intensity, 0 (nothing done) to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct HeatLevel(u8);

impl HeatLevel {
    pub const MAX: HeatLevel = HeatLevel(4);

    /// Level steps up at 1, 2, 4 and 6 completed events.
    pub fn from_done_count(done: usize) -> Self {
        let level = match done {
            0 => 0,
            1 => 1,
            2..=3 => 2,
            4..=5 => 3,
            _ => 4,
        };
        HeatLevel(level)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn all() -> [HeatLevel; 5] {
        [0, 1, 2, 3, 4].map(HeatLevel)
    }
}

/// What a single day looks like on the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Cell {
    pub level: HeatLevel,
    /// Text of the day's meta event, empty when there is none.
    pub glyph: String,
}

pub fn done_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| e.status == EventStatus::Done)
        .count()
}

pub fn glyph(events: &[Event]) -> &str {
    events
        .iter()
        .find(|e| e.is_meta())
        .map(|e| e.text.as_str())
        .unwrap_or("")
}

/// Derive a cell from the day's events. Nothing else feeds into it.
pub fn project(events: &[Event]) -> Cell {
    Cell {
        level: HeatLevel::from_done_count(done_count(events)),
        glyph: glyph(events).to_string(),
    }
}
