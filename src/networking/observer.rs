//! Collaborator callbacks invoked by the sync engine
//!
//! Renderers, status displays, leaderboards and payout settlers live outside
//! this crate. They implement [`GameObserver`] and receive board updates,
//! status text and the final result.
//!
//! Callbacks run synchronously on the task that triggered them and must not
//! block.

use chess_engine::{Board, Color};
use shared::protocol::Winner;
use tracing::info;

/// Result of a finished game from the local player's seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn for_seat(winner: Winner, local: Color) -> Self {
        match winner.color() {
            None => Outcome::Draw,
            Some(color) if color == local => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }
}

pub trait GameObserver: Send + Sync {
    /// Cached board replaced (optimistic apply, rollback or reconcile)
    fn on_board_changed(&self, _board: &Board) {}

    /// Human-readable status line
    fn on_status_message(&self, _message: &str) {}

    /// Game finished with a result. Fired at most once per game.
    fn on_terminal_state(&self, _winner: Winner, _outcome: Outcome) {}
}

/// Observer that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl GameObserver for LoggingObserver {
    fn on_status_message(&self, message: &str) {
        info!("[SYNC] {}", message);
    }

    fn on_terminal_state(&self, winner: Winner, outcome: Outcome) {
        info!("[SYNC] Game over: winner {:?}, outcome {:?}", winner, outcome);
    }
}
