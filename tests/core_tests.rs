//! Integration tests for the rules engine
//!
//! Properties that must hold for every position (enumerated moves never leave
//! the mover in check, enumeration is repeatable, checkmate and stalemate are
//! exclusive) plus the fixed scenarios: pawn double step and smothered mate.

use chess_engine::{
    all_legal_moves, evaluate_status, is_checkmate, is_king_in_check, is_legal_move,
    is_stalemate, select_move, Board, BoardStatus, Color, Difficulty, Piece, PieceKind, Square,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

fn create_test_board(pieces: &[(PieceKind, Color, &str)]) -> Board {
    Board::from_placements(
        pieces
            .iter()
            .map(|(kind, color, square)| (sq(square), Piece::new(*kind, *color))),
    )
}

/// Positions reached by seeded random play from the initial layout
fn random_positions(seed: u64, plies: usize) -> Vec<(Board, Color)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::initial();
    let mut to_move = Color::White;
    let mut positions = vec![(board, to_move)];

    for _ in 0..plies {
        let Some(mv) = select_move(&board, Difficulty::Easy, to_move, &mut rng)
            .expect("both kings stay on the board")
        else {
            break;
        };
        board.apply_move(&mv).expect("enumerated move applies");
        to_move = to_move.opponent();
        positions.push((board, to_move));
    }
    positions
}

// ============================================================================
// Properties over random positions
// ============================================================================

#[test]
fn test_enumerated_moves_never_leave_king_in_check() {
    //! Apply every enumerated move and confirm the mover's king is safe.

    for seed in [1, 2, 3] {
        for (board, color) in random_positions(seed, 60) {
            for mv in all_legal_moves(color, &board).expect("kings present") {
                let after = board.with_move(&mv).expect("move applies");
                assert!(
                    !is_king_in_check(color, &after).expect("king present"),
                    "{} left the {} king in check on\n{}",
                    mv,
                    color,
                    board
                );
            }
        }
    }
}

#[test]
fn test_enumeration_is_idempotent() {
    //! Two enumerations of an unmodified board give the same sequence.

    for (board, color) in random_positions(11, 40) {
        let first = all_legal_moves(color, &board).expect("kings present");
        let second = all_legal_moves(color, &board).expect("kings present");
        assert_eq!(first, second);
    }
}

#[test]
fn test_enumerated_moves_agree_with_validator() {
    //! Every enumerated move passes `is_legal_move` and carries the capture
    //! flag of the pre-move board.

    for (board, color) in random_positions(5, 50) {
        for mv in all_legal_moves(color, &board).expect("kings present") {
            assert!(is_legal_move(mv.piece, mv.from, mv.to, &board).expect("kings present"));
            assert_eq!(mv.is_capture, board.piece_at(mv.to).is_some());
            assert_eq!(mv.piece.color, color);
        }
    }
}

#[test]
fn test_checkmate_and_stalemate_are_exclusive() {
    //! Across random play the two terminal predicates never hold together,
    //! and each requires an empty move list.

    for seed in [7, 8] {
        for (board, color) in random_positions(seed, 120) {
            let mate = is_checkmate(color, &board).expect("kings present");
            let stale = is_stalemate(color, &board).expect("kings present");
            assert!(!(mate && stale));
            if mate || stale {
                assert!(all_legal_moves(color, &board).expect("kings present").is_empty());
            }
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_pawn_double_step_requires_empty_intermediate() {
    //! A White pawn on row 1 may move two rows only if both squares ahead
    //! are empty.

    let open = create_test_board(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Pawn, Color::White, "e2"),
    ]);
    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    assert!(is_legal_move(pawn, sq("e2"), sq("e4"), &open).expect("kings present"));

    let blocked = create_test_board(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Pawn, Color::White, "e2"),
        (PieceKind::Knight, Color::Black, "e3"),
    ]);
    assert!(!is_legal_move(pawn, sq("e2"), sq("e4"), &blocked).expect("kings present"));

    let from_later_row = create_test_board(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Pawn, Color::White, "e3"),
    ]);
    assert!(!is_legal_move(pawn, sq("e3"), sq("e5"), &from_later_row).expect("kings present"));
}

#[test]
fn test_smothered_mate_is_checkmate() {
    //! King boxed in by its own pieces and checked by a knight.

    let board = create_test_board(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::Rook, Color::Black, "g8"),
        (PieceKind::Pawn, Color::Black, "g7"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Knight, Color::White, "f7"),
    ]);

    assert!(is_king_in_check(Color::Black, &board).expect("king present"));
    assert!(all_legal_moves(Color::Black, &board).expect("kings present").is_empty());
    assert_eq!(
        evaluate_status(Color::Black, &board).expect("kings present"),
        BoardStatus::Checkmate
    );
    assert!(!is_stalemate(Color::Black, &board).expect("kings present"));
}

#[test]
fn test_cornered_king_is_stalemate() {
    //! No legal move but not in check: stalemate, not checkmate.

    let board = create_test_board(&[
        (PieceKind::King, Color::White, "c1"),
        (PieceKind::Queen, Color::White, "b6"),
        (PieceKind::King, Color::Black, "a8"),
    ]);

    assert!(!is_king_in_check(Color::Black, &board).expect("king present"));
    assert_eq!(
        evaluate_status(Color::Black, &board).expect("kings present"),
        BoardStatus::Stalemate
    );
    assert!(!is_checkmate(Color::Black, &board).expect("kings present"));
}

#[test]
fn test_missing_king_surfaces_as_error() {
    //! A board without a king is corrupt; enumeration reports it.

    let board = create_test_board(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Pawn, Color::Black, "e7"),
    ]);
    assert!(all_legal_moves(Color::Black, &board).is_err());
}
