//! Knight movement: an exact (2,1) or (1,2) offset. Knights jump, so there
//! is no path check.

use crate::types::Square;

pub(super) fn is_knight_reachable(from: Square, to: Square) -> bool {
    let drow = (to.row() as i8 - from.row() as i8).abs();
    let dcol = (to.col() as i8 - from.col() as i8).abs();
    (drow == 2 && dcol == 1) || (drow == 1 && dcol == 2)
}
