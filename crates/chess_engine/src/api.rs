//! Public API for the chess engine
//!
//! Provides the whole-board queries built on top of move validation:
//! legal move enumeration and game status (check, checkmate, stalemate).

mod moves;
mod state;

pub use moves::{all_legal_moves, legal_destinations};
pub use state::{evaluate_status, is_checkmate, is_stalemate, BoardStatus};
