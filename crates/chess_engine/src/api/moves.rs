//! Legal move enumeration
//!
//! Exhaustively tries every (piece-of-color, destination) pair on the
//! board. Output order is row-major by origin, then row-major by
//! destination. Consumers should not rely on the order for correctness.

use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::move_gen::is_legal_move;
use crate::types::{Color, Move, Piece, PieceKind, Square};

/// Every legal move for `color` on `board`.
///
/// `is_capture` is computed from the pre-move board. A pawn move onto the
/// promotion row carries `promotion: Some(Queen)`.
///
/// # Errors
///
/// [`crate::ChessEngineError::KingNotFound`] if `color` has no king.
pub fn all_legal_moves(color: Color, board: &Board) -> ChessEngineResult<Vec<Move>> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces(color) {
        collect_moves_from(piece, from, board, &mut moves)?;
    }
    Ok(moves)
}

/// Legal destinations of the piece on `from`, for move highlighting.
/// An empty square yields no destinations.
pub fn legal_destinations(from: Square, board: &Board) -> ChessEngineResult<Vec<Square>> {
    let Some(piece) = board.piece_at(from) else {
        return Ok(Vec::new());
    };
    let mut moves = Vec::new();
    collect_moves_from(piece, from, board, &mut moves)?;
    Ok(moves.into_iter().map(|mv| mv.to).collect())
}

fn collect_moves_from(
    piece: Piece,
    from: Square,
    board: &Board,
    moves: &mut Vec<Move>,
) -> ChessEngineResult<()> {
    for to in Square::all() {
        if !is_legal_move(piece, from, to, board)? {
            continue;
        }
        let mut mv = Move::new(piece, from, to);
        mv.is_capture = board.piece_at(to).is_some();
        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            mv.promotion = Some(PieceKind::Queen);
        }
        moves.push(mv);
    }
    Ok(())
}
