//! Change-feed listener
//!
//! One task per attached game. It forwards every revision to
//! [`TurnSyncEngine::reconcile`] and resubscribes with a flat delay when the
//! subscription fails or the feed ends. After a resubscribe the current
//! record is fetched once so revisions written while disconnected are not
//! lost. A delivered revision resets the failure count.
//!
//! The task holds only a weak reference to the engine and stops when the
//! engine is gone.

use crate::core::SyncSettings;
use crate::networking::client::TurnSyncEngine;
use crate::networking::store::{ChangeFeed, GameStore};
use shared::protocol::{GameId, GameRecord};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Flat resubscribe policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// Consecutive failures tolerated; `None` never gives up
    pub budget: Option<u32>,
}

impl RetryPolicy {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            delay: settings.resubscribe_delay(),
            budget: settings.resubscribe_budget,
        }
    }

    pub fn is_exhausted(&self, failures: u32) -> bool {
        self.budget.is_some_and(|budget| failures >= budget)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&SyncSettings::default())
    }
}

pub(crate) fn spawn_listener(
    engine: Weak<TurnSyncEngine>,
    store: Arc<dyn GameStore>,
    game_id: GameId,
    feed: ChangeFeed,
    policy: RetryPolicy,
) -> JoinHandle<()> {
    tokio::spawn(listen(engine, store, game_id, feed, policy))
}

async fn listen(
    engine: Weak<TurnSyncEngine>,
    store: Arc<dyn GameStore>,
    game_id: GameId,
    feed: ChangeFeed,
    policy: RetryPolicy,
) {
    let mut pending = Some(feed);
    let mut failures: u32 = 0;

    loop {
        let mut feed = match pending.take() {
            Some(feed) => feed,
            None => match store.subscribe(&game_id).await {
                Ok(feed) => {
                    info!(
                        "[FEED] Resubscribed to {} after {} failure(s)",
                        game_id, failures
                    );
                    match store.fetch(&game_id).await {
                        Ok(Some(record)) => {
                            failures = 0;
                            if !deliver(&engine, record) {
                                return;
                            }
                        }
                        Ok(None) => {
                            failures = 0;
                            debug!("[FEED] {} has no record yet", game_id);
                        }
                        Err(e) => warn!("[FEED] Catch-up fetch of {} failed: {}", game_id, e),
                    }
                    feed
                }
                Err(e) => {
                    failures += 1;
                    warn!(
                        "[FEED] Resubscribe to {} failed (attempt {}): {}",
                        game_id, failures, e
                    );
                    if policy.is_exhausted(failures) {
                        give_up(&engine, &game_id);
                        return;
                    }
                    tokio::time::sleep(policy.delay).await;
                    continue;
                }
            },
        };

        while let Some(event) = feed.next().await {
            match event {
                Ok(record) => {
                    failures = 0;
                    if !deliver(&engine, record) {
                        return;
                    }
                }
                Err(e) => {
                    warn!("[FEED] Feed for {} failed: {}", game_id, e);
                    break;
                }
            }
        }

        failures += 1;
        if policy.is_exhausted(failures) {
            give_up(&engine, &game_id);
            return;
        }
        debug!(
            "[FEED] Resubscribing to {} in {:?}",
            game_id, policy.delay
        );
        tokio::time::sleep(policy.delay).await;
    }
}

/// Hand a revision to the engine; `false` once the engine is gone
fn deliver(engine: &Weak<TurnSyncEngine>, record: GameRecord) -> bool {
    match engine.upgrade() {
        Some(engine) => {
            engine.reconcile(record);
            true
        }
        None => false,
    }
}

fn give_up(engine: &Weak<TurnSyncEngine>, game_id: &str) {
    if let Some(engine) = engine.upgrade() {
        engine.feed_lost(game_id);
    }
}
