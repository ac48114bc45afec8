//! Networking module - multiplayer turn synchronization
//!
//! - [`store`] - External document store boundary and the in-memory store
//! - [`client`] - [`TurnSyncEngine`], the per-client turn state machine
//! - [`feed`] - Change-feed listener with flat resubscribe
//! - [`observer`] - Callbacks into renderers, status displays and result sinks

pub mod client;
pub mod error;
pub mod feed;
pub mod observer;
pub mod store;

pub use client::{generate_game_code, generate_player_id, SyncPhase, TurnSyncEngine};
pub use error::{SyncError, SyncResult};
pub use feed::RetryPolicy;
pub use observer::{GameObserver, LoggingObserver, Outcome};
pub use store::{ChangeFeed, FeedEvent, GameStore, MemoryStore, StoreError};
