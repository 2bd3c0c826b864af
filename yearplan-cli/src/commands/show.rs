use anyhow::Result;
use yearplan_core::DateKey;

use super::connect;
use crate::render::render_day;

pub async fn run(date: DateKey) -> Result<()> {
    let session = connect(false).await?;
    println!("{}", render_day(&date, session.events(&date)));
    Ok(())
}
