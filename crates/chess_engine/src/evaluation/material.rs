//! Material evaluation
//!
//! Standard centipawn values. The king carries a large finite value so a
//! king "capture" would dominate any other score.

use crate::board::Board;
use crate::types::{Color, Move, PieceKind};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// One-ply score of a move: the value of the captured piece, 0 otherwise.
/// `board` is the position before the move.
pub fn capture_score(board: &Board, mv: &Move) -> i32 {
    if !mv.is_capture {
        return 0;
    }
    board
        .piece_at(mv.to)
        .map_or(0, |captured| piece_value(captured.kind))
}

/// Material balance from White's point of view, kings excluded
pub fn evaluate_material(board: &Board) -> i32 {
    board
        .occupied()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .map(|(_, piece)| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}
