//! Error types for chess engine
//!
//! Provides custom error types for board access and rule evaluation.
//! Every variant describes a broken invariant or bad caller input; the
//! rules functions never turn one of these into a silent `false`.

use crate::types::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Coordinates outside the 8x8 grid
    #[error("Invalid square: ({row}, {col}) is off the board")]
    InvalidSquare { row: i16, col: i16 },

    /// Square notation that does not name a board square
    #[error("Invalid square notation: {notation:?}")]
    InvalidNotation { notation: String },

    /// No piece at source square
    #[error("No piece at source square {square}")]
    NoPieceAtSquare { square: Square },

    /// The piece on the board differs from the one the move claims to move
    #[error("Piece at square {square} is {found}, move expected {expected}")]
    PieceMismatch {
        square: Square,
        expected: Piece,
        found: Piece,
    },

    /// A color has no king on the board
    #[error("No {color} king on the board")]
    KingNotFound { color: Color },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
