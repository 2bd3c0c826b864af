use anyhow::Result;
use yearplan_core::DateKey;

use super::connect;
use crate::render::render_heatmap;

pub async fn run() -> Result<()> {
    let session = connect(false).await?;
    println!("{}", render_heatmap(&session, DateKey::today()));
    Ok(())
}
