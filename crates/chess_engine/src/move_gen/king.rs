//! King movement: one square in any direction.

use crate::types::Square;

pub(super) fn is_king_reachable(from: Square, to: Square) -> bool {
    let drow = (to.row() as i8 - from.row() as i8).abs();
    let dcol = (to.col() as i8 - from.col() as i8).abs();
    drow <= 1 && dcol <= 1
}
