//! Error types for the turn synchronization layer

use crate::game::error::GameError;
use crate::networking::store::StoreError;
use chess_engine::{ChessEngineError, Color};
use shared::protocol::{GameId, GameStatus};
use thiserror::Error;

/// Errors surfaced by [`TurnSyncEngine`](crate::networking::TurnSyncEngine)
/// operations. None of the input-validation variants mutate state.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Engine is not attached to any game
    #[error("Not attached to a game")]
    NotAttached,

    /// Engine was detached while the operation was running
    #[error("Detached from game {game_id}")]
    Detached { game_id: GameId },

    /// Already attached to a different game
    #[error("Already playing game {game_id}")]
    AlreadyInGame { game_id: GameId },

    /// A game creation is already running on this engine
    #[error("Game creation already in progress")]
    CreationInFlight,

    /// A move proposal is already waiting for the store
    #[error("A move is already being submitted")]
    MoveInFlight,

    /// Local color does not own the turn
    #[error("Not your turn: {to_move} to move")]
    NotYourTurn { to_move: Color },

    /// Game is not accepting moves
    #[error("Game is {status:?}, moves are not accepted")]
    GameNotActive { status: GameStatus },

    /// Proposed move fails the rules
    #[error("Invalid move: {message}")]
    InvalidMove { message: String },

    /// Join code does not exist
    #[error("Game {game_id} not found")]
    GameNotFound { game_id: GameId },

    /// Both seats are taken by other players
    #[error("Game {game_id} is full")]
    GameFull { game_id: GameId },

    /// Game is already over and cannot be joined
    #[error("Game {game_id} is already finished")]
    GameFinished { game_id: GameId },

    /// Could not find a free game code
    #[error("No free game code after {attempts} attempts")]
    CodeExhausted { attempts: u32 },

    /// AI turn requested without a worker
    #[error("No AI worker configured")]
    AiUnavailable,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] ChessEngineError),

    #[error("AI error: {0}")]
    Ai(#[from] GameError),
}

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
