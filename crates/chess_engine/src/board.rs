//! Board representation
//!
//! An 8x8 grid of optional piece tokens, the single source of truth for one
//! ply. `Board` is `Copy`: hypothetical positions (self-check exclusion, AI
//! snapshots) are cheap copies and never alias the caller's grid.

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{Color, Move, Piece, PieceKind, Square};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

const BACK_ROW: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard starting position
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            let back = color.back_row() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, kind) in BACK_ROW.iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(*kind, color));
                board.cells[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Build a board from explicit placements; later placements win
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Self::empty();
        for (square, piece) in placements {
            board.place(square, piece);
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color)
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.cells[square.row() as usize][square.col() as usize] = Some(piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize].take()
    }

    /// Occupied squares in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Pieces of one color in row-major order
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Locate the king of `color`.
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::KingNotFound`] when the color has no king. Every
    /// position reachable through play has both kings, so this indicates a
    /// corrupted board.
    pub fn find_king(&self, color: Color) -> ChessEngineResult<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
            .ok_or(ChessEngineError::KingNotFound { color })
    }

    /// Copy of the board with `piece` moved from `from` to `to`.
    ///
    /// No rule checks; used for hypothetical positions.
    pub fn relocated(&self, piece: Piece, from: Square, to: Square) -> Board {
        let mut scratch = *self;
        scratch.remove(from);
        scratch.place(to, piece);
        scratch
    }

    /// Apply a move in place, returning the captured piece if any.
    ///
    /// The moving piece must be on `mv.from`. A promotion replaces the pawn
    /// with the promoted kind on the destination square. Legality is the
    /// caller's concern; see [`crate::move_gen::is_legal_move`].
    pub fn apply_move(&mut self, mv: &Move) -> ChessEngineResult<Option<Piece>> {
        let found = self
            .piece_at(mv.from)
            .ok_or(ChessEngineError::NoPieceAtSquare { square: mv.from })?;
        if found != mv.piece {
            return Err(ChessEngineError::PieceMismatch {
                square: mv.from,
                expected: mv.piece,
                found,
            });
        }

        self.remove(mv.from);
        let captured = self.remove(mv.to);
        let landed = match mv.promotion {
            Some(kind) => Piece::new(kind, mv.piece.color),
            None => mv.piece,
        };
        self.place(mv.to, landed);
        Ok(captured)
    }

    /// Copy-on-write variant of [`Board::apply_move`]
    pub fn with_move(&self, mv: &Move) -> ChessEngineResult<Board> {
        let mut next = *self;
        next.apply_move(mv)?;
        Ok(next)
    }

    /// Board with rows flipped and colors swapped
    pub fn mirrored(&self) -> Board {
        Board::from_placements(self.occupied().map(|(square, piece)| {
            (
                square.mirrored(),
                Piece::new(piece.kind, piece.color.opponent()),
            )
        }))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let symbol = self.cells[row][col].map_or('.', Piece::symbol);
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("a7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));
    }

    #[test]
    fn test_find_king_missing_is_error() {
        let board = Board::from_placements([(sq("e1"), Piece::new(PieceKind::King, Color::White))]);
        assert_eq!(board.find_king(Color::White), Ok(sq("e1")));
        assert_eq!(
            board.find_king(Color::Black),
            Err(ChessEngineError::KingNotFound {
                color: Color::Black
            })
        );
    }

    #[test]
    fn test_apply_move_captures_and_relocates() {
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let knight = Piece::new(PieceKind::Knight, Color::Black);
        let mut board = Board::from_placements([(sq("a1"), rook), (sq("a5"), knight)]);

        let mut mv = Move::new(rook, sq("a1"), sq("a5"));
        mv.is_capture = true;
        let captured = board.apply_move(&mv).expect("rook is on a1");

        assert_eq!(captured, Some(knight));
        assert!(board.is_empty(sq("a1")));
        assert_eq!(board.piece_at(sq("a5")), Some(rook));
    }

    #[test]
    fn test_apply_move_promotion() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut board = Board::from_placements([(sq("c7"), pawn)]);
        let mut mv = Move::new(pawn, sq("c7"), sq("c8"));
        mv.promotion = Some(PieceKind::Queen);

        board.apply_move(&mv).expect("pawn is on c7");
        assert_eq!(
            board.piece_at(sq("c8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn test_apply_move_rejects_wrong_piece() {
        let mut board = Board::initial();
        let ghost = Piece::new(PieceKind::Queen, Color::White);
        let err = board
            .apply_move(&Move::new(ghost, sq("e2"), sq("e4")))
            .expect_err("e2 holds a pawn");
        assert!(matches!(err, ChessEngineError::PieceMismatch { .. }));
        assert_eq!(board, Board::initial(), "failed apply must not mutate");

        let err = board
            .apply_move(&Move::new(ghost, sq("e4"), sq("e5")))
            .expect_err("e4 is empty");
        assert_eq!(err, ChessEngineError::NoPieceAtSquare { square: sq("e4") });
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::initial();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let next = board
            .with_move(&Move::new(pawn, sq("e2"), sq("e4")))
            .expect("pawn is on e2");
        assert_eq!(board, Board::initial());
        assert_eq!(next.piece_at(sq("e4")), Some(pawn));
    }

    #[test]
    fn test_mirrored_initial_is_initial() {
        assert_eq!(Board::initial().mirrored(), Board::initial());
    }

    #[test]
    fn test_display_diagram() {
        let text = Board::initial().to_string();
        let first = text.lines().next().expect("diagram has lines");
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
