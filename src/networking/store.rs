//! External document store boundary
//!
//! The store owns every [`GameRecord`]. Clients read it, overwrite it whole,
//! and watch it through a change feed that delivers each subsequent revision
//! of one game in write order.
//!
//! [`MemoryStore`] is the in-process implementation used by the CLI and the
//! tests. It carries fault hooks (failing writes and subscriptions, dropped
//! feeds, write latency) so the retry and rollback paths can be exercised.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::protocol::{GameId, GameRecord};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Errors reported by a [`GameStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Game {game_id} not found")]
    NotFound { game_id: GameId },

    #[error("Game {game_id} already exists")]
    AlreadyExists { game_id: GameId },

    #[error("Write rejected: {message}")]
    WriteRejected { message: String },

    #[error("Subscription failed: {message}")]
    SubscriptionFailed { message: String },

    #[error("Change feed dropped: {message}")]
    FeedDropped { message: String },
}

/// One change-feed delivery: a full revision or a feed failure
pub type FeedEvent = Result<GameRecord, StoreError>;

/// Receiving end of a change-feed subscription.
///
/// Ends (`None`) when the store drops the subscription.
pub struct ChangeFeed {
    events: mpsc::UnboundedReceiver<FeedEvent>,
}

impl ChangeFeed {
    pub fn new(events: mpsc::UnboundedReceiver<FeedEvent>) -> Self {
        Self { events }
    }

    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Create a record. Fails with `AlreadyExists` if the id is taken.
    async fn insert(&self, record: GameRecord) -> Result<(), StoreError>;

    /// Current revision, `None` when no such game exists
    async fn fetch(&self, game_id: &str) -> Result<Option<GameRecord>, StoreError>;

    /// Overwrite an existing record (last write wins)
    async fn write(&self, record: GameRecord) -> Result<(), StoreError>;

    /// Watch one game id. Only revisions written after the call are
    /// delivered; the game does not have to exist yet.
    async fn subscribe(&self, game_id: &str) -> Result<ChangeFeed, StoreError>;
}

/// In-memory store for testing and local play
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    records: HashMap<GameId, GameRecord>,
    watchers: HashMap<GameId, Vec<mpsc::UnboundedSender<FeedEvent>>>,
    failing_writes: u32,
    failing_subscribes: u32,
    write_latency: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: HashMap::new(),
                watchers: HashMap::new(),
                failing_writes: 0,
                failing_subscribes: 0,
                write_latency: Duration::ZERO,
            }),
        }
    }

    /// Reject the next `count` writes and inserts
    pub fn fail_next_writes(&self, count: u32) {
        self.inner.lock().failing_writes = count;
    }

    /// Reject the next `count` subscriptions
    pub fn fail_next_subscribes(&self, count: u32) {
        self.inner.lock().failing_subscribes = count;
    }

    /// Delay every write and insert before it is applied
    pub fn set_write_latency(&self, latency: Duration) {
        self.inner.lock().write_latency = latency;
    }

    /// Terminate every feed of `game_id` with a `FeedDropped` error
    pub fn drop_feeds(&self, game_id: &str) {
        let mut inner = self.inner.lock();
        if let Some(watchers) = inner.watchers.remove(game_id) {
            debug!("[STORE] Dropping {} feed(s) of {}", watchers.len(), game_id);
            for tx in watchers {
                let _ = tx.send(Err(StoreError::FeedDropped {
                    message: "connection reset".to_string(),
                }));
            }
        }
    }

    /// Current revision without going through the async boundary
    pub fn record(&self, game_id: &str) -> Option<GameRecord> {
        self.inner.lock().records.get(game_id).cloned()
    }

    /// Live subscriptions for `game_id`
    pub fn subscriber_count(&self, game_id: &str) -> usize {
        let mut inner = self.inner.lock();
        match inner.watchers.get_mut(game_id) {
            Some(watchers) => {
                watchers.retain(|tx| !tx.is_closed());
                watchers.len()
            }
            None => 0,
        }
    }

    fn take_write_failure(inner: &mut Inner) -> Result<(), StoreError> {
        if inner.failing_writes > 0 {
            inner.failing_writes -= 1;
            warn!("[STORE] Injected write failure");
            return Err(StoreError::WriteRejected {
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    /// Deliver a revision to every watcher while the lock is held, which
    /// keeps delivery in write order.
    fn notify(inner: &mut Inner, record: &GameRecord) {
        if let Some(watchers) = inner.watchers.get_mut(&record.game_id) {
            watchers.retain(|tx| tx.send(Ok(record.clone())).is_ok());
        }
    }

    async fn simulate_latency(&self) {
        let latency = self.inner.lock().write_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn insert(&self, record: GameRecord) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.lock();
        Self::take_write_failure(&mut inner)?;
        if inner.records.contains_key(&record.game_id) {
            return Err(StoreError::AlreadyExists {
                game_id: record.game_id,
            });
        }
        debug!("[STORE] Insert {}", record.game_id);
        Self::notify(&mut inner, &record);
        inner.records.insert(record.game_id.clone(), record);
        Ok(())
    }

    async fn fetch(&self, game_id: &str) -> Result<Option<GameRecord>, StoreError> {
        Ok(self.inner.lock().records.get(game_id).cloned())
    }

    async fn write(&self, record: GameRecord) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.lock();
        Self::take_write_failure(&mut inner)?;
        if !inner.records.contains_key(&record.game_id) {
            return Err(StoreError::NotFound {
                game_id: record.game_id,
            });
        }
        debug!(
            "[STORE] Write {} ({:?}, {} to move)",
            record.game_id, record.game_state, record.current_player
        );
        Self::notify(&mut inner, &record);
        inner.records.insert(record.game_id.clone(), record);
        Ok(())
    }

    async fn subscribe(&self, game_id: &str) -> Result<ChangeFeed, StoreError> {
        let mut inner = self.inner.lock();
        if inner.failing_subscribes > 0 {
            inner.failing_subscribes -= 1;
            warn!("[STORE] Injected subscription failure for {}", game_id);
            return Err(StoreError::SubscriptionFailed {
                message: "injected failure".to_string(),
            });
        }
        let (tx, rx) = mpsc::unbounded_channel();
        inner
            .watchers
            .entry(game_id.to_string())
            .or_default()
            .push(tx);
        Ok(ChangeFeed::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::protocol::GameStatus;

    fn record(id: &str) -> GameRecord {
        GameRecord::new_waiting(id.to_string(), "alice".to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_store_feed_delivers_in_write_order() {
        let store = MemoryStore::new();
        let mut feed = store.subscribe("GAMEAA").await.expect("subscribe");

        let first = record("GAMEAA");
        store.insert(first.clone()).await.expect("insert");
        let mut second = first.clone();
        second.game_state = GameStatus::Active;
        second.updated_at = first.next_timestamp(Utc::now());
        store.write(second.clone()).await.expect("write");

        assert_eq!(feed.next().await, Some(Ok(first)));
        assert_eq!(feed.next().await, Some(Ok(second)));
    }

    #[tokio::test]
    async fn test_store_insert_rejects_duplicate() {
        let store = MemoryStore::new();
        store.insert(record("GAMEAA")).await.expect("insert");
        let err = store.insert(record("GAMEAA")).await.expect_err("duplicate");
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_store_write_requires_existing_record() {
        let store = MemoryStore::new();
        let err = store.write(record("NOPEAA")).await.expect_err("missing");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_store_injected_failures_are_consumed() {
        let store = MemoryStore::new();
        store.fail_next_writes(1);
        assert!(store.insert(record("GAMEAA")).await.is_err());
        assert!(store.insert(record("GAMEAA")).await.is_ok());

        store.fail_next_subscribes(1);
        assert!(store.subscribe("GAMEAA").await.is_err());
        assert!(store.subscribe("GAMEAA").await.is_ok());
    }

    #[tokio::test]
    async fn test_store_drop_feeds_ends_subscription() {
        let store = MemoryStore::new();
        let mut feed = store.subscribe("GAMEAA").await.expect("subscribe");
        store.drop_feeds("GAMEAA");

        assert!(matches!(
            feed.next().await,
            Some(Err(StoreError::FeedDropped { .. }))
        ));
        assert_eq!(feed.next().await, None);
        assert_eq!(store.subscriber_count("GAMEAA"), 0);
    }
}
