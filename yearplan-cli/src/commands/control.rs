//! `toggle` and `delete`: the two per-event controls.

use anyhow::Result;
use owo_colors::OwoColorize;
use yearplan_core::{Control, DateKey, EventId};

use super::connect;
use crate::render::render_day;

pub async fn run(date: DateKey, id: EventId, control: Control) -> Result<()> {
    let mut session = connect(true).await?;
    session.open(date);

    let outcome = match control {
        Control::Primary => session.primary(&id),
        Control::Delete => session.delete(&id),
    };
    if outcome.is_none() {
        eprintln!("{}", format!("No event #{id} on {date}").dimmed());
    }

    println!("{}", render_day(&date, session.events(&date)));
    session.drain().await;
    Ok(())
}
