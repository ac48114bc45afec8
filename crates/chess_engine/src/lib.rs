//! Chess rules engine
//!
//! Pure game logic for an 8x8 mailbox board: per-piece move validation,
//! check detection, legal move enumeration and a shallow move picker.
//! Nothing in this crate performs I/O or suspends; every operation completes
//! in time proportional to the board size.
//!
//! # Module Structure
//!
//! - `types` - Colors, piece kinds, squares and moves
//! - `board` - The 8x8 grid and move application
//! - `move_gen` - Reachability, legality and attack detection
//! - `api` - Legal move enumeration and game status queries
//! - `evaluation` - Material values
//! - `search` - Move selection policies for the AI opponent

pub mod api;
pub mod board;
pub mod error;
pub mod evaluation;
pub mod move_gen;
pub mod search;
pub mod types;

pub use api::{all_legal_moves, evaluate_status, is_checkmate, is_stalemate, legal_destinations, BoardStatus};
pub use board::Board;
pub use error::{ChessEngineError, ChessEngineResult};
pub use move_gen::{is_king_in_check, is_legal_move, is_reachable, is_square_under_attack};
pub use search::{select_move, Difficulty};
pub use types::{Color, Move, Piece, PieceKind, Square};
