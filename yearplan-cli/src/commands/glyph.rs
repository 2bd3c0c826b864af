use anyhow::Result;
use yearplan_core::DateKey;

use super::connect;
use crate::render::render_day;

/// Set the day's glyph, or clear it when none is given.
pub async fn run(date: DateKey, glyph: Option<String>) -> Result<()> {
    let mut session = connect(true).await?;
    session.open(date);
    session.set_glyph(glyph.as_deref().unwrap_or(""));

    println!("{}", render_day(&date, session.events(&date)));
    session.drain().await;
    Ok(())
}
