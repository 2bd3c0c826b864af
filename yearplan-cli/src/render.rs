//! Terminal rendering for yearplan types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to yearplan-core types using owo_colors.

use owo_colors::OwoColorize;
use yearplan_core::transition::describe;
use yearplan_core::{Cell, Control, DateKey, Event, EventStatus, HeatLevel};

use crate::session::Session;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Cell colors from empty to busiest.
const PALETTE: [(u8, u8, u8); 5] = [
    (48, 54, 61),
    (14, 68, 41),
    (0, 109, 50),
    (38, 166, 65),
    (57, 211, 83),
];

impl Render for HeatLevel {
    fn render(&self) -> String {
        let (r, g, b) = PALETTE[usize::from(self.value()).min(PALETTE.len() - 1)];
        "■".truecolor(r, g, b).to_string()
    }
}

/// Two columns wide: the glyph if the day has one, else a colored square.
impl Render for Cell {
    fn render(&self) -> String {
        if self.glyph.is_empty() {
            format!("{} ", self.level.render())
        } else if self.glyph.is_ascii() && self.glyph.chars().count() == 1 {
            format!("{} ", self.glyph)
        } else {
            self.glyph.clone()
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let (marker, text) = match self.status {
            EventStatus::Todo => ("[ ]".to_string(), self.text.clone()),
            EventStatus::Done => ("[x]".green().to_string(), self.text.clone()),
            EventStatus::Giveup => (
                "[-]".dimmed().to_string(),
                self.text.strikethrough().dimmed().to_string(),
            ),
            EventStatus::Meta => (String::new(), self.text.clone()),
        };

        let hints: Vec<_> = [Control::Primary, Control::Delete]
            .into_iter()
            .filter_map(|control| describe(self.status, control))
            .collect();

        format!(
            "{} {}  {}",
            marker,
            text,
            format!("#{} {}", self.id, hints.join(" · ")).dimmed()
        )
    }
}

/// The whole year as rows of ten days, with a legend.
pub fn render_heatmap(session: &Session, today: DateKey) -> String {
    let year = session.year();
    let active_days = session
        .cells()
        .values()
        .filter(|cell| cell.level.value() > 0)
        .count();
    let mut lines = vec![
        format!(
            "{} {}",
            format!("{} heatmap", year.value()).bold(),
            format!("· {active_days} day(s) with something done").dimmed()
        ),
        String::new(),
    ];

    for block in year.blocks() {
        let Some(first) = block.first() else {
            continue;
        };

        let cells: String = block
            .iter()
            .map(|date| {
                let cell = session.cell(date).render();
                if *date == today {
                    cell.underline().to_string()
                } else {
                    cell
                }
            })
            .collect();

        let label = first.date().format("%b %d").to_string();
        lines.push(format!("{}  {}", label.dimmed(), cells));
    }

    let legend: Vec<_> = HeatLevel::all().iter().map(Render::render).collect();
    lines.push(String::new());
    lines.push(format!("{} {} {}", "Less".dimmed(), legend.join(" "), "More".dimmed()));

    lines.join("\n")
}

const SECTIONS: [(&str, EventStatus); 3] = [
    ("Todo", EventStatus::Todo),
    ("Done", EventStatus::Done),
    ("Given up", EventStatus::Giveup),
];

/// One day's events grouped by status. The glyph event shows in the title.
pub fn render_day(date: &DateKey, events: &[Event]) -> String {
    let glyph = yearplan_core::heatmap::glyph(events);
    let weekday = date.date().format("%A").to_string();

    let mut title = format!("{} {}", date.to_string().bold(), weekday.dimmed());
    if !glyph.is_empty() {
        title = format!("{glyph} {title}");
    }
    let mut lines = vec![title];

    let mut listed = 0;
    for (label, status) in SECTIONS {
        let section: Vec<_> = events.iter().filter(|e| e.status == status).collect();
        if section.is_empty() {
            continue;
        }

        listed += section.len();
        lines.push(String::new());
        lines.push(format!("{} ({})", label.bold(), section.len()));
        lines.extend(section.iter().map(|e| format!("  {}", e.render())));
    }

    if listed == 0 {
        lines.push(String::new());
        lines.push("Nothing today.".dimmed().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yearplan_core::EventId;

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    fn day() -> DateKey {
        DateKey::parse("2026-03-02").unwrap()
    }

    #[test]
    fn test_day_groups_by_status_and_hides_meta() {
        let events = vec![
            Event::new(EventId::Number(1), "read", EventStatus::Todo),
            Event::new(EventId::Number(2), "run", EventStatus::Done),
            Event::meta("🏃"),
            Event::new(EventId::Number(3), "swim", EventStatus::Giveup),
        ];

        let out = plain(&render_day(&day(), &events));
        assert!(out.starts_with("🏃 2026-03-02 Monday"));
        assert!(out.contains("Todo (1)"));
        assert!(out.contains("Done (1)"));
        assert!(out.contains("Given up (1)"));
        assert!(out.contains("#3 restore · delete forever"));
        assert!(out.contains("#1 toggle · give up"));
        assert!(!out.contains("meta-emoji"));
        assert!(!out.contains("Nothing today."));
    }

    #[test]
    fn test_empty_sections_hidden() {
        let events = vec![Event::new(EventId::Number(1), "read", EventStatus::Todo)];
        let out = plain(&render_day(&day(), &events));
        assert!(!out.contains("Done"));
        assert!(!out.contains("Given up"));
    }

    #[test]
    fn test_day_with_only_glyph_is_empty() {
        let out = plain(&render_day(&day(), &[Event::meta("⭐")]));
        assert!(out.contains("Nothing today."));
    }

    #[test]
    fn test_cell_prefers_glyph() {
        let cell = Cell {
            level: HeatLevel::from_done_count(3),
            glyph: "⭐".to_string(),
        };
        assert_eq!(cell.render(), "⭐");

        let cell = Cell {
            level: HeatLevel::default(),
            glyph: "A".to_string(),
        };
        assert_eq!(cell.render(), "A ");
    }
}
