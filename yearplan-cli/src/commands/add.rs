use anyhow::Result;
use yearplan_core::{DateKey, InitialStatus};

use super::connect;
use crate::render::render_day;

pub async fn run(date: DateKey, text: Vec<String>, done: bool) -> Result<()> {
    let mut session = connect(true).await?;
    let status = if done {
        InitialStatus::Done
    } else {
        InitialStatus::Todo
    };

    session.open(date);
    session.add_event(&text.join(" "), status);

    println!("{}", render_day(&date, session.events(&date)));
    session.drain().await;
    Ok(())
}
