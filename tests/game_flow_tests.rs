//! Game Flow Integration Tests
//!
//! Tests for full game flows including:
//! - Opening move counts
//! - AI move selection
//! - Win conditions reached through play
//! - Promotion
//! - The background AI worker

use chess_engine::{
    all_legal_moves, evaluate_status, select_move, Board, BoardStatus, Color, Difficulty, Move,
    Piece, PieceKind, Square,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::protocol::AiRequest;
use turnchess::game::ai::AiWorker;
use turnchess::game::GameError;

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

/// Play a move given in `e2e4` form, looking the piece up on the board
fn play(board: &mut Board, from: &str, to: &str) -> Move {
    let piece = board.piece_at(sq(from)).expect("piece on origin square");
    let mut mv = Move::new(piece, sq(from), sq(to));
    mv.is_capture = board.piece_at(sq(to)).is_some();
    board.apply_move(&mv).expect("piece matches");
    mv
}

// ============================================================================
// Opening
// ============================================================================

#[test]
fn test_both_players_have_twenty_opening_moves() {
    let board = Board::initial();

    let white_moves = all_legal_moves(Color::White, &board).expect("kings present");
    let black_moves = all_legal_moves(Color::Black, &board).expect("kings present");

    assert_eq!(white_moves.len(), 20, "White should have 20 moves");
    assert_eq!(black_moves.len(), 20, "Black should have 20 moves");
    assert!(white_moves.iter().all(|mv| !mv.is_capture));
}

#[test]
fn test_opening_order_is_row_major() {
    //! The first enumerated White move is the queen-side knight to a3.

    let moves = all_legal_moves(Color::White, &Board::initial()).expect("kings present");
    let first = moves.first().expect("white has moves");
    assert_eq!((first.from, first.to), (sq("b1"), sq("a3")));
}

// ============================================================================
// AI selection
// ============================================================================

#[test]
fn test_hard_ai_takes_the_only_rook_capture() {
    //! One capture worth 500 among quiet moves: hard picks it.

    let board = create_test_board(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Pawn, Color::White, "e2"),
        (PieceKind::Knight, Color::White, "g1"),
        (PieceKind::Rook, Color::Black, "h3"),
        (PieceKind::King, Color::Black, "e8"),
    ]);
    let mut rng = StdRng::seed_from_u64(3);

    let chosen = select_move(&board, Difficulty::Hard, Color::White, &mut rng)
        .expect("kings present")
        .expect("white has moves");

    assert_eq!((chosen.from, chosen.to), (sq("g1"), sq("h3")));
    assert!(chosen.is_capture);
}

#[test]
fn test_easy_ai_is_reproducible_with_seed() {
    let board = Board::initial();
    let legal = all_legal_moves(Color::White, &board).expect("kings present");

    let pick = |seed| {
        select_move(&board, Difficulty::Easy, Color::White, &mut StdRng::seed_from_u64(seed))
            .expect("kings present")
            .expect("white has moves")
    };

    assert_eq!(pick(9), pick(9));
    assert!(legal.contains(&pick(9)));
}

#[test]
fn test_ai_returns_none_when_mated() {
    let board = create_test_board(&[
        (PieceKind::King, Color::White, "a1"),
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::Rook, Color::Black, "g8"),
        (PieceKind::Pawn, Color::Black, "g7"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Knight, Color::White, "f7"),
    ]);
    let mut rng = StdRng::seed_from_u64(1);
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        assert_eq!(
            select_move(&board, difficulty, Color::Black, &mut rng).expect("kings present"),
            None
        );
    }
}

// ============================================================================
// Win conditions through play
// ============================================================================

#[test]
fn test_scholars_mate() {
    let mut board = Board::initial();
    play(&mut board, "e2", "e4");
    play(&mut board, "e7", "e5");
    play(&mut board, "f1", "c4");
    play(&mut board, "b8", "c6");
    play(&mut board, "d1", "h5");
    play(&mut board, "g8", "f6");
    assert_eq!(
        evaluate_status(Color::White, &board).expect("kings present"),
        BoardStatus::Ongoing
    );

    let mate = play(&mut board, "h5", "f7");
    assert!(mate.is_capture);
    assert_eq!(
        evaluate_status(Color::Black, &board).expect("kings present"),
        BoardStatus::Checkmate
    );
}

#[test]
fn test_check_is_reported() {
    let mut board = Board::initial();
    play(&mut board, "e2", "e4");
    play(&mut board, "d7", "d5");
    play(&mut board, "f1", "b5");
    assert_eq!(
        evaluate_status(Color::Black, &board).expect("kings present"),
        BoardStatus::Check
    );
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_enumerated_promotion_defaults_to_queen() {
    let mut board = create_test_board(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Pawn, Color::White, "a7"),
        (PieceKind::King, Color::Black, "h5"),
    ]);

    let promotion = all_legal_moves(Color::White, &board)
        .expect("kings present")
        .into_iter()
        .find(|mv| mv.from == sq("a7"))
        .expect("pawn can advance");
    assert_eq!(promotion.promotion, Some(PieceKind::Queen));

    board.apply_move(&promotion).expect("pawn on a7");
    assert_eq!(
        board.piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Queen, Color::White))
    );
}

// ============================================================================
// AI worker
// ============================================================================

#[tokio::test]
async fn test_worker_hard_matches_direct_selection() {
    let worker = AiWorker::spawn_with_rng(StdRng::seed_from_u64(1)).expect("spawn");
    let board = Board::initial();

    let response = worker
        .request(AiRequest {
            board,
            difficulty: Difficulty::Hard,
            current_color: Color::White,
        })
        .await
        .expect("worker answers");

    let direct = select_move(&board, Difficulty::Hard, Color::White, &mut StdRng::seed_from_u64(1))
        .expect("kings present");
    assert_eq!(response.chosen, direct);
}

#[tokio::test]
async fn test_worker_serves_requests_after_cancel() {
    //! Cancellation only affects requests queued before it.

    let worker = AiWorker::spawn_with_rng(StdRng::seed_from_u64(2)).expect("spawn");
    worker.cancel_pending();

    let response = worker
        .request(AiRequest {
            board: Board::initial(),
            difficulty: Difficulty::Easy,
            current_color: Color::Black,
        })
        .await
        .expect("new request is not cancelled");
    assert_eq!(
        response.chosen.map(|mv| mv.piece.color),
        Some(Color::Black)
    );
}

#[tokio::test]
async fn test_worker_reports_no_move_for_mated_side() {
    let worker = AiWorker::spawn_with_rng(StdRng::seed_from_u64(2)).expect("spawn");
    let board = create_test_board(&[
        (PieceKind::King, Color::White, "c1"),
        (PieceKind::Queen, Color::White, "b6"),
        (PieceKind::King, Color::Black, "a8"),
    ]);

    let response = worker
        .request(AiRequest {
            board,
            difficulty: Difficulty::Hard,
            current_color: Color::Black,
        })
        .await;
    assert!(!matches!(response, Err(GameError::Cancelled)));
    assert_eq!(response.expect("answered").chosen, None);
}
