//! Core types for yearplan.
//!
//! This crate provides the pieces shared by the `yearplan` CLI and
//! `yearplan-server`:
//! - `DateKey` and `Year` for addressing days of the tracked year
//! - `Event` and the status `transition` table for the overloaded controls
//! - `EventStore`, the in-memory date → events mapping
//! - `heatmap` for projecting a day's events onto a heat level and glyph
//! - `protocol` for the JSON shapes exchanged with the remote endpoint

pub mod date_key;
pub mod error;
pub mod event;
pub mod heatmap;
pub mod protocol;
pub mod store;
pub mod transition;
pub mod year;

pub use date_key::DateKey;
pub use error::{YearPlanError, YearPlanResult};
pub use event::{Event, EventId, EventStatus, InitialStatus, META_EVENT_ID};
pub use heatmap::{Cell, HeatLevel};
pub use store::{EventStore, Snapshot};
pub use transition::{Control, Outcome};
pub use year::Year;
