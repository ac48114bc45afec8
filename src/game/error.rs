//! Error types for game module
//!
//! Failures of the AI worker boundary.

use chess_engine::ChessEngineError;

/// Errors that can occur while computing an AI move
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Worker thread is gone; no further requests can be served
    #[error("AI worker stopped: {message}")]
    WorkerStopped { message: String },

    /// Request was invalidated by `cancel_pending` before it completed
    #[error("AI request cancelled")]
    Cancelled,

    /// Rules engine rejected the snapshot (e.g. missing king)
    #[error("Engine error: {0}")]
    Engine(#[from] ChessEngineError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
