//! Core library for the evboard community event board.
//!
//! This crate provides everything the CLI builds on:
//! - `event` — board-neutral event types and the canonical sample record
//! - `config` — startup configuration (file + environment overrides)
//! - `auth` / `session` — identity-toolkit client and session bootstrapping
//! - `store` / `firestore` — the event-store seam, live subscriptions, and
//!   the Firestore REST implementation
//! - `assistant` — single-turn Gemini queries
//! - `links` — pure calendar/map deep-link builders

pub mod assistant;
pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod firestore;
pub mod links;
pub mod session;
pub mod store;

// Re-export the types nearly every caller touches
pub use auth::{AuthClient, AuthService, Identity};
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult};
pub use event::{Coordinates, Event, SAMPLE_EVENT_TITLE, StoredEvent, sample_event};
pub use session::Session;
pub use store::{AddStatus, EventStore, Subscription, add_sample_event, subscribe};
