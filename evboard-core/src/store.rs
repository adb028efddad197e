//! Event store abstraction and live sync.
//!
//! [`EventStore`] is the seam between the board and the hosted document
//! store: list the collection, create one document. [`subscribe`] turns the
//! list operation into a push-style feed — a background task polls the store
//! and delivers the full decoded snapshot on every change, until the
//! subscription is released.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::BoardResult;
use crate::event::{Event, StoredEvent, SAMPLE_EVENT_TITLE, sample_event};

/// Operations the board needs from the remote collection.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetch the full collection in upstream arrival order.
    async fn list(&self) -> BoardResult<Vec<StoredEvent>>;

    /// Append one document, returning its opaque key.
    async fn create(&self, event: &Event) -> BoardResult<String>;
}

/// Default poll interval for live subscriptions.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// A live subscription to the event collection.
///
/// Dropping the subscription (or calling [`unsubscribe`](Self::unsubscribe))
/// stops the poll task; no snapshots are delivered afterwards.
pub struct Subscription {
    rx: mpsc::Receiver<Vec<StoredEvent>>,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Wait for the next snapshot. Returns `None` once the subscription has
    /// been torn down.
    pub async fn next_snapshot(&mut self) -> Option<Vec<StoredEvent>> {
        self.rx.recv().await
    }

    /// Stop the poll task. Snapshots already queued are discarded.
    pub fn unsubscribe(&mut self) {
        self.handle.abort();
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Open a live subscription over `store`.
///
/// The first successful poll always delivers a snapshot; afterwards one is
/// delivered per observed change. Poll errors are logged and leave the
/// mirror at its last-known state.
pub fn subscribe(store: Arc<dyn EventStore>, interval: Duration) -> Subscription {
    let (tx, rx) = mpsc::channel(8);

    let handle = tokio::spawn(async move {
        let mut last: Option<Vec<StoredEvent>> = None;

        loop {
            match store.list().await {
                Ok(snapshot) => {
                    if last.as_ref() != Some(&snapshot) {
                        if tx.send(snapshot.clone()).await.is_err() {
                            return;
                        }
                        last = Some(snapshot);
                    }
                }
                Err(e) => {
                    eprintln!("Event subscription poll failed: {}", e);
                }
            }

            tokio::time::sleep(interval).await;
        }
    });

    Subscription { rx, handle }
}

/// Outcome of the add-sample-event operation, rendered to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStatus {
    Idle,
    InProgress,
    Added,
    AlreadyAdded,
    Failed(String),
}

impl std::fmt::Display for AddStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddStatus::Idle => write!(f, "Idle"),
            AddStatus::InProgress => write!(f, "Adding event..."),
            AddStatus::Added => write!(f, "Event added!"),
            AddStatus::AlreadyAdded => write!(f, "Event already added."),
            AddStatus::Failed(msg) => write!(f, "Failed to add event: {}", msg),
        }
    }
}

/// Append the canonical sample event unless a record with the same title is
/// already mirrored locally.
///
/// The duplicate check is client-side and title-only: two sessions adding
/// concurrently can both pass it, and the store keeps both writes. Known
/// limitation, not a general uniqueness mechanism.
pub async fn add_sample_event(store: &dyn EventStore, mirror: &[StoredEvent]) -> AddStatus {
    if mirror.iter().any(|s| s.event.title == SAMPLE_EVENT_TITLE) {
        return AddStatus::AlreadyAdded;
    }

    match store.create(&sample_event()).await {
        Ok(_) => AddStatus::Added,
        Err(e) => AddStatus::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store double with a create-call counter.
    struct FakeStore {
        events: Mutex<Vec<StoredEvent>>,
        create_calls: AtomicUsize,
        fail_create: bool,
    }

    impl FakeStore {
        fn with_events(events: Vec<StoredEvent>) -> Self {
            FakeStore {
                events: Mutex::new(events),
                create_calls: AtomicUsize::new(0),
                fail_create: false,
            }
        }

        fn push(&self, stored: StoredEvent) {
            self.events.lock().unwrap().push(stored);
        }
    }

    #[async_trait]
    impl EventStore for FakeStore {
        async fn list(&self) -> BoardResult<Vec<StoredEvent>> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create(&self, event: &Event) -> BoardResult<String> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(BoardError::Store("permission denied".into()));
            }
            let id = format!("doc-{}", self.create_calls.load(Ordering::SeqCst));
            self.push(StoredEvent {
                id: id.clone(),
                event: event.clone(),
            });
            Ok(id)
        }
    }

    fn stored(id: &str, title: &str) -> StoredEvent {
        StoredEvent {
            id: id.to_string(),
            event: Event {
                title: title.to_string(),
                date: "2025-10-01".to_string(),
                mode: "Online".to_string(),
                description: String::new(),
                location: None,
                coordinates: None,
            },
        }
    }

    // --- add_sample_event ---

    #[tokio::test]
    async fn add_appends_sample_when_absent() {
        let store = FakeStore::with_events(vec![stored("a", "Rust Meetup")]);
        let mirror = store.list().await.unwrap();

        let status = add_sample_event(&store, &mirror).await;

        assert_eq!(status, AddStatus::Added);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_title_skips_network_write() {
        let store = FakeStore::with_events(vec![stored("a", SAMPLE_EVENT_TITLE)]);
        let mirror = store.list().await.unwrap();

        let status = add_sample_event(&store, &mirror).await;

        assert_eq!(status, AddStatus::AlreadyAdded);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_failure_surfaces_message() {
        let mut store = FakeStore::with_events(vec![]);
        store.fail_create = true;

        let status = add_sample_event(&store, &[]).await;

        match status {
            AddStatus::Failed(msg) => assert!(msg.contains("permission denied")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    // --- subscribe ---

    #[tokio::test]
    async fn first_poll_delivers_snapshot() {
        let store = Arc::new(FakeStore::with_events(vec![stored("a", "Rust Meetup")]));
        let mut sub = subscribe(store, Duration::from_millis(10));

        let snapshot = sub.next_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].event.title, "Rust Meetup");
    }

    #[tokio::test]
    async fn change_delivers_new_snapshot() {
        let store = Arc::new(FakeStore::with_events(vec![]));
        let mut sub = subscribe(store.clone(), Duration::from_millis(10));

        let first = sub.next_snapshot().await.unwrap();
        assert!(first.is_empty());

        store.push(stored("b", "DevFest"));
        let second = sub.next_snapshot().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].event.title, "DevFest");
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let store = Arc::new(FakeStore::with_events(vec![stored("a", "Rust Meetup")]));
        let mut sub = subscribe(store.clone(), Duration::from_millis(10));

        sub.next_snapshot().await.unwrap();
        sub.unsubscribe();

        // Upstream keeps changing, but the subscription is gone.
        store.push(stored("b", "DevFest"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sub.next_snapshot().await, None);
    }
}
