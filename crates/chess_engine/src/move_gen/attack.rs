//! Attack detection and check
//!
//! A square is under attack by a color iff some piece of that color can
//! reach it per [`is_reachable`], or a pawn of that color covers it
//! diagonally. Reachability never consults check
//! detection, which is what keeps legality checks from recursing.

use super::is_reachable;
use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::types::{Color, PieceKind, Square};

/// Check if a square is under attack by pieces of `attacking`.
///
/// Pawns are counted by their capture diagonals whether or not the square
/// is occupied, so empty squares report pawn attacks as well.
pub fn is_square_under_attack(square: Square, attacking: Color, board: &Board) -> bool {
    board.pieces(attacking).any(|(from, piece)| match piece.kind {
        PieceKind::Pawn => pawn_attacks(attacking, from, square),
        _ => is_reachable(piece, from, square, board),
    })
}

/// One row ahead, one column aside
fn pawn_attacks(color: Color, from: Square, target: Square) -> bool {
    [-1, 1]
        .into_iter()
        .any(|dcol| from.offset(color.pawn_direction(), dcol) == Some(target))
}

/// Whether the king of `color` is attacked.
///
/// # Errors
///
/// [`crate::ChessEngineError::KingNotFound`] when `color` has no king.
pub fn is_king_in_check(color: Color, board: &Board) -> ChessEngineResult<bool> {
    let king = board.find_king(color)?;
    Ok(is_square_under_attack(king, color.opponent(), board))
}
