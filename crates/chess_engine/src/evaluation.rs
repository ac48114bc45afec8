//! Position evaluation
//!
//! Only material is evaluated; the move picker scores captures by the value
//! of the captured piece and nothing deeper.

mod material;

pub use material::{capture_score, evaluate_material, piece_value};
pub use material::{BISHOP_VALUE, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE};
