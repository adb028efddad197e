use std::sync::Arc;

use anyhow::Result;
use evboard_core::store::{EventStore, POLL_INTERVAL, subscribe};
use evboard_core::BoardConfig;
use owo_colors::OwoColorize;

use crate::render::render_board;

pub async fn run(config: &BoardConfig, watch: bool) -> Result<()> {
    let store = super::connect(config).await?;

    if !watch {
        let events = store.list().await?;
        println!("{}", render_board(&events));
        return Ok(());
    }

    // Live mode: mirror the collection until interrupted. The subscription
    // owns the poll task; ctrl-c tears it down explicitly.
    let mut subscription = subscribe(Arc::new(store), POLL_INTERVAL);
    println!("{}", "Watching the board (ctrl-c to stop)...".dimmed());

    loop {
        let next = tokio::select! {
            snapshot = subscription.next_snapshot() => snapshot,
            _ = tokio::signal::ctrl_c() => None,
        };

        match next {
            Some(events) => {
                println!();
                println!("{}", render_board(&events));
            }
            None => {
                subscription.unsubscribe();
                break;
            }
        }
    }

    Ok(())
}
