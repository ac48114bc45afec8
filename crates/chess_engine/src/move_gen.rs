//! Move validation
//!
//! Two layers, kept as separate operations:
//!
//! - [`is_reachable`] - pure geometry: board bounds (guaranteed by [`Square`]),
//!   friendly-fire exclusion and the per-kind movement rule including path
//!   clearance. Never recurses into check detection, so attack scans use it.
//! - [`is_legal_move`] - reachability plus self-check exclusion: the move is
//!   played on a scratch copy and rejected if the mover's king is attacked.
//!
//! Castling and en passant are not part of the rules implemented here.

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;


pub use attack::{is_king_in_check, is_square_under_attack};

use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::types::{Piece, PieceKind, Square};

/// Whether `piece` standing on `from` can geometrically reach `to`.
///
/// Does not consider whether the move exposes the mover's own king.
pub fn is_reachable(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to {
        return false;
    }

    // Can't capture your own pieces
    if board.color_at(to) == Some(piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn::is_pawn_reachable(piece.color, from, to, board),
        PieceKind::Knight => knight::is_knight_reachable(from, to),
        PieceKind::Bishop => sliding::is_bishop_reachable(from, to, board),
        PieceKind::Rook => sliding::is_rook_reachable(from, to, board),
        PieceKind::Queen => sliding::is_queen_reachable(from, to, board),
        PieceKind::King => king::is_king_reachable(from, to),
    }
}

/// Whether moving `piece` from `from` to `to` is legal: reachable and not
/// leaving the mover's king in check. The caller's board is not modified.
///
/// # Errors
///
/// [`crate::ChessEngineError::KingNotFound`] if the mover has no king.
pub fn is_legal_move(
    piece: Piece,
    from: Square,
    to: Square,
    board: &Board,
) -> ChessEngineResult<bool> {
    if !is_reachable(piece, from, to, board) {
        return Ok(false);
    }
    let scratch = board.relocated(piece, from, to);
    Ok(!is_king_in_check(piece.color, &scratch)?)
}
