//! Sliding pieces (bishops, rooks, queens)
//!
//! Each needs its geometric constraint to hold and every square strictly
//! between origin and destination to be empty. The destination itself is
//! excluded from the clearance scan; friendly-fire is rejected upstream.

use crate::board::Board;
use crate::types::Square;

pub(super) fn is_bishop_reachable(from: Square, to: Square, board: &Board) -> bool {
    let drow = (to.row() as i8 - from.row() as i8).abs();
    let dcol = (to.col() as i8 - from.col() as i8).abs();

    if drow != dcol {
        return false;
    }
    is_path_clear(from, to, board)
}

pub(super) fn is_rook_reachable(from: Square, to: Square, board: &Board) -> bool {
    if from.row() != to.row() && from.col() != to.col() {
        return false;
    }
    is_path_clear(from, to, board)
}

pub(super) fn is_queen_reachable(from: Square, to: Square, board: &Board) -> bool {
    is_rook_reachable(from, to, board) || is_bishop_reachable(from, to, board)
}

/// Scan the squares strictly between `from` and `to` along a rank, file or
/// diagonal. Callers guarantee the two squares are aligned.
fn is_path_clear(from: Square, to: Square, board: &Board) -> bool {
    let drow = (to.row() as i8 - from.row() as i8).signum();
    let dcol = (to.col() as i8 - from.col() as i8).signum();

    let mut current = from.offset(drow, dcol);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if !board.is_empty(square) {
            return false;
        }
        current = square.offset(drow, dcol);
    }

    // Walked off the board without meeting `to`: not aligned
    false
}
