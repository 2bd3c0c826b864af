//! Status transitions for the two per-event controls.
//!
//! Each event exposes a primary control and a delete control whose meaning
//! depends on the event's current status:
//!
//! | current  | primary        | delete          |
//! |----------|----------------|-----------------|
//! | todo     | done           | giveup          |
//! | done     | todo           | giveup          |
//! | giveup   | todo (restore) | destroyed       |
//! | meta     | -              | -               |

use crate::event::EventStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Complete / uncomplete, or restore when abandoned.
    Primary,
    /// Give up, or delete permanently when already abandoned.
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    SetStatus(EventStatus),
    Destroy,
}

/// Look up the effect of `control` on an event in `status`.
/// `None` means the control does nothing for that status.
pub fn transition(status: EventStatus, control: Control) -> Option<Outcome> {
    use Control::*;
    use EventStatus::*;

    match (status, control) {
        (Todo, Primary) => Some(Outcome::SetStatus(Done)),
        (Done, Primary) => Some(Outcome::SetStatus(Todo)),
        (Giveup, Primary) => Some(Outcome::SetStatus(Todo)),
        (Todo | Done, Delete) => Some(Outcome::SetStatus(Giveup)),
        (Giveup, Delete) => Some(Outcome::Destroy),
        (Meta, _) => None,
    }
}

/// Short label describing what the control would do, for hints in the UI.
pub fn describe(status: EventStatus, control: Control) -> Option<&'static str> {
    match (transition(status, control)?, control) {
        (Outcome::Destroy, _) => Some("delete forever"),
        (Outcome::SetStatus(EventStatus::Giveup), _) => Some("give up"),
        (_, Control::Primary) if status == EventStatus::Giveup => Some("restore"),
        (_, Control::Primary) => Some("toggle"),
        (Outcome::SetStatus(_), Control::Delete) => None,
    }
}
