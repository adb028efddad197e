use anyhow::Result;
use evboard_core::store::{AddStatus, EventStore, add_sample_event};
use evboard_core::BoardConfig;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(config: &BoardConfig) -> Result<()> {
    let store = super::connect(config).await?;

    // The duplicate guard works off the mirrored collection, so refresh it
    // before deciding whether to write.
    let mirror = store.list().await?;

    println!("{}", AddStatus::InProgress.to_string().dimmed());
    let status = add_sample_event(&store, &mirror).await;
    println!("{}", status.render());

    Ok(())
}
