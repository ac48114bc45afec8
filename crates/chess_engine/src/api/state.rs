//! Game status detection
//!
//! Checkmate and stalemate both mean the side to move has no legal move;
//! they differ only in whether that side's king is attacked.

use super::moves::all_legal_moves;
use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::move_gen::is_king_in_check;
use crate::types::Color;

/// Status of one color on a given board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoardStatus {
    /// Has legal moves, king not attacked
    Ongoing,
    /// Has legal moves, king attacked
    Check,
    /// No legal moves, king attacked
    Checkmate,
    /// No legal moves, king not attacked
    Stalemate,
}

impl BoardStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BoardStatus::Checkmate | BoardStatus::Stalemate)
    }
}

/// Classify the position for `color` with a single enumeration
pub fn evaluate_status(color: Color, board: &Board) -> ChessEngineResult<BoardStatus> {
    let in_check = is_king_in_check(color, board)?;
    let has_moves = !all_legal_moves(color, board)?.is_empty();
    Ok(match (in_check, has_moves) {
        (false, true) => BoardStatus::Ongoing,
        (true, true) => BoardStatus::Check,
        (true, false) => BoardStatus::Checkmate,
        (false, false) => BoardStatus::Stalemate,
    })
}

pub fn is_checkmate(color: Color, board: &Board) -> ChessEngineResult<bool> {
    Ok(evaluate_status(color, board)? == BoardStatus::Checkmate)
}

pub fn is_stalemate(color: Color, board: &Board) -> ChessEngineResult<bool> {
    Ok(evaluate_status(color, board)? == BoardStatus::Stalemate)
}
