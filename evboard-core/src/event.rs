//! Board-neutral event types.
//!
//! These types represent community events in a store-agnostic way.
//! The Firestore client converts its document payloads into these types,
//! and everything else (sync, rendering, link building) works with them.

use serde::{Deserialize, Serialize};

/// A community event as shown on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    /// Free-form date string as entered upstream (not a strict calendar type)
    pub date: String,
    /// Enum-like string ("In-person", "Online", ...) — kept free-form so
    /// unknown upstream values still decode
    pub mode: String,
    pub description: String,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Geographic position attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// An event together with its opaque document key in the remote store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub id: String,
    pub event: Event,
}

/// Title of the canonical sample event. Duplicate detection for the add
/// operation compares against this exact string.
pub const SAMPLE_EVENT_TITLE: &str = "GDG Hackathon 2025";

/// The one fixed record the add operation can append to the board.
pub fn sample_event() -> Event {
    Event {
        title: SAMPLE_EVENT_TITLE.to_string(),
        date: "2025-11-15".to_string(),
        mode: "In-person".to_string(),
        description: "A 24-hour community hackathon focused on building with Google technologies."
            .to_string(),
        location: Some("Google Developer Space, Bengaluru".to_string()),
        coordinates: Some(Coordinates {
            lat: 12.9716,
            lng: 77.5946,
        }),
    }
}
