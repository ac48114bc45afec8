//! Wire types shared by every client
//!
//! The [`GameRecord`] is the document each game keeps in the external store.
//! The store owns it; clients hold cached copies that are replaced wholesale
//! whenever a new revision arrives on the change feed.
//!
//! Ordering assumption: revisions of one record are delivered to every
//! subscriber in write order (last write wins). That is only sound because
//! turns strictly alternate and only the side to move writes; a game with
//! simultaneous moves would need real conflict resolution.

use chess_engine::{Board, Color, Difficulty, Move};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type GameId = String;
pub type PlayerId = String;

/// Lifecycle of a persisted game
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Created, second player not yet joined
    Waiting,
    /// Both seats taken, moves being played
    Active,
    /// Finished by checkmate or stalemate
    Completed,
    /// Abandoned by one of the players
    Ended,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Completed | GameStatus::Ended)
    }
}

/// Result of a finished game
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Winner {
    pub fn color(self) -> Option<Color> {
        match self {
            Winner::White => Some(Color::White),
            Winner::Black => Some(Color::Black),
            Winner::Draw => None,
        }
    }
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

/// Per-square bookkeeping stored next to the positions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PieceState {
    pub has_moved: bool,
}

/// Board as persisted: the grid plus a piece-state map keyed by square
/// notation (`"e2"`). The map is informational; legality never reads it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub positions: Board,
    #[serde(default)]
    pub piece_state: BTreeMap<String, PieceState>,
}

impl BoardSnapshot {
    pub fn initial() -> Self {
        let positions = Board::initial();
        let piece_state = positions
            .occupied()
            .map(|(square, _)| (square.to_string(), PieceState::default()))
            .collect();
        Self {
            positions,
            piece_state,
        }
    }

    /// Apply a move to the grid and carry the piece state along with it
    pub fn apply(&mut self, mv: &Move) -> chess_engine::ChessEngineResult<()> {
        self.positions.apply_move(mv)?;
        self.piece_state.remove(&mv.from.to_string());
        self.piece_state
            .insert(mv.to.to_string(), PieceState { has_moved: true });
        Ok(())
    }
}

/// The persisted game document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: GameId,
    pub white_player: Option<PlayerId>,
    pub black_player: Option<PlayerId>,
    pub board: BoardSnapshot,
    pub current_player: Color,
    pub game_state: GameStatus,
    pub last_move: Option<Move>,
    pub winner: Option<Winner>,
    pub updated_at: DateTime<Utc>,
}

impl GameRecord {
    /// Fresh game: initial layout, White to move, creator seated as White
    pub fn new_waiting(game_id: GameId, creator: PlayerId, now: DateTime<Utc>) -> Self {
        Self {
            game_id,
            white_player: Some(creator),
            black_player: None,
            board: BoardSnapshot::initial(),
            current_player: Color::White,
            game_state: GameStatus::Waiting,
            last_move: None,
            winner: None,
            updated_at: now,
        }
    }

    pub fn player(&self, color: Color) -> Option<&PlayerId> {
        match color {
            Color::White => self.white_player.as_ref(),
            Color::Black => self.black_player.as_ref(),
        }
    }

    /// Seat held by `player`, if any
    pub fn color_of(&self, player: &str) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| self.player(*color).map(String::as_str) == Some(player))
    }

    /// Timestamp for the next revision: wall clock, but always strictly
    /// after the current revision.
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let floor = self.updated_at + Duration::milliseconds(1);
        now.max(floor)
    }
}

/// Request to the AI worker. The board is a snapshot, never the live one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AiRequest {
    pub board: Board,
    pub difficulty: Difficulty,
    pub current_color: Color,
}

/// Worker answer: `None` means the side to move has no legal move
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiResponse {
    pub chosen: Option<Move>,
}
