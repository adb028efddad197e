//! Terminal rendering for board types.
//!
//! Extension trait adding colored card rendering to core types using
//! owo_colors, in the style of a scrollable card list: title line, meta
//! line, description, then the derived deep links.

use evboard_core::links::{self, MAP_PLACEHOLDER};
use evboard_core::{AddStatus, StoredEvent};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for StoredEvent {
    fn render(&self) -> String {
        let event = &self.event;
        let mut lines = Vec::new();

        lines.push(format!("  {}", event.title.bold()));

        let mut meta = vec![event.date.clone()];
        if !event.mode.is_empty() {
            meta.push(event.mode.clone());
        }
        if let Some(location) = &event.location {
            meta.push(location.clone());
        }
        lines.push(format!("  {}", meta.join("  ·  ").dimmed()));

        if !event.description.is_empty() {
            lines.push(format!("  {}", event.description));
        }

        lines.push(format!(
            "  {} {}",
            "calendar:".dimmed(),
            links::calendar_link(event).cyan()
        ));
        let map = links::map_link(event);
        if map != MAP_PLACEHOLDER {
            lines.push(format!("  {} {}", "map:".dimmed(), map.cyan()));
        }

        lines.join("\n")
    }
}

impl Render for AddStatus {
    fn render(&self) -> String {
        match self {
            AddStatus::Added => self.to_string().green().to_string(),
            AddStatus::AlreadyAdded => self.to_string().yellow().to_string(),
            AddStatus::Failed(_) => self.to_string().red().to_string(),
            AddStatus::Idle | AddStatus::InProgress => self.to_string().dimmed().to_string(),
        }
    }
}

/// Render the whole mirrored collection as a card list.
pub fn render_board(events: &[StoredEvent]) -> String {
    if events.is_empty() {
        return "  No events on the board yet.".dimmed().to_string();
    }

    events
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
