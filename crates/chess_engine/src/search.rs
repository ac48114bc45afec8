//! Move selection for the AI opponent
//!
//! Two policies over the legal move set:
//!
//! | Difficulty | Policy |
//! |------------|--------|
//! | Easy       | Uniform random choice |
//! | Hard       | One-ply capture greedy: score = value of the captured piece |
//!
//! Hard is deliberately shallow. With no capture available every move scores
//! 0 and the first enumerated move is returned. Ties go to the first move seen
//! (strict `>` comparison); callers should only rely on "some maximal-score
//! move is chosen".
//!
//! Selection scans every (origin, destination) pair, so it belongs off the
//! interactive path. The client runs it on a worker thread.

use crate::api::all_legal_moves;
use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::evaluation::capture_score;
use crate::types::{Color, Move};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Uniform random legal move
    #[default]
    Easy,
    /// Greedy one-ply capture
    Hard,
}

/// `"hard"` (any case) selects [`Difficulty::Hard`]; anything else is Easy.
impl FromStr for Difficulty {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("hard") {
            Ok(Difficulty::Hard)
        } else {
            Ok(Difficulty::Easy)
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

/// Pick a move for `color`, or `None` when it has no legal move (the caller
/// decides between checkmate and stalemate).
pub fn select_move<R>(
    board: &Board,
    difficulty: Difficulty,
    color: Color,
    rng: &mut R,
) -> ChessEngineResult<Option<Move>>
where
    R: Rng + ?Sized,
{
    let moves = all_legal_moves(color, board)?;
    let chosen = match difficulty {
        Difficulty::Easy => moves.choose(rng).copied(),
        Difficulty::Hard => best_capture(board, &moves),
    };
    Ok(chosen)
}

fn best_capture(board: &Board, moves: &[Move]) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let score = capture_score(board, mv);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*mv, score)),
        }
    }
    best.map(|(mv, _)| mv)
}
