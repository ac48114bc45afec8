//! Pawn movement
//!
//! - **Forward push**: one square toward the opponent, only onto an empty square
//! - **Double push**: from the color's starting row only, both the
//!   intermediate and destination squares empty
//! - **Captures**: one square diagonally forward, only onto an opponent piece
//!
//! Direction comes from [`Color::pawn_direction`]. Promotion is handled at
//! move construction and application, not here.

use crate::board::Board;
use crate::types::{Color, Square};

pub(super) fn is_pawn_reachable(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let direction = color.pawn_direction();
    let drow = to.row() as i8 - from.row() as i8;
    let dcol = to.col() as i8 - from.col() as i8;

    if dcol == 0 && drow == direction {
        return board.is_empty(to);
    }

    if dcol == 0 && drow == 2 * direction && from.row() == color.pawn_start_row() {
        return match from.offset(direction, 0) {
            Some(intermediate) => board.is_empty(intermediate) && board.is_empty(to),
            None => false,
        };
    }

    if dcol.abs() == 1 && drow == direction {
        return board.color_at(to) == Some(color.opponent());
    }

    false
}
