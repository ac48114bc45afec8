//! Turn synchronization engine
//!
//! Keeps one client's view of a two-player game consistent with the record in
//! the external store.
//!
//! # Protocol
//!
//! ```text
//! idle -> waiting_for_opponent -> active -> completed
//!                    \              \
//!                     `-> ended <----`      (abandonment)
//! ```
//!
//! - **Create** writes a fresh `waiting` record and seats the creator as White
//! - **Join** seats the joiner as Black and flips the record to `active`;
//!   rejoining a seat already held re-attaches without writing
//! - **Propose move** is only allowed for the turn owner. The move is applied
//!   to the cached record at once (optimistic), the opponent's status is
//!   evaluated on the new board, and the whole record is written back
//! - **Reconcile** replaces the cached record wholesale with every revision
//!   arriving on the change feed, including echoes of our own writes
//! - **Leave** writes `ended` (plus the opponent as winner when the game was
//!   running) and detaches
//!
//! # Consistency model
//!
//! No merging and no conflict resolution: the store orders revisions and the
//! last write wins. This is sound only because turns strictly alternate and
//! only the turn owner writes. A game with simultaneous moves would need real
//! conflict resolution.
//!
//! At most one proposal per client is in flight; a second one, or a leave
//! issued meanwhile, is rejected locally instead of racing the store.

use crate::core::SyncSettings;
use crate::game::ai::AiWorker;
use crate::networking::error::{SyncError, SyncResult};
use crate::networking::feed::{self, RetryPolicy};
use crate::networking::observer::{GameObserver, LoggingObserver, Outcome};
use crate::networking::store::{ChangeFeed, GameStore, StoreError};
use chess_engine::{
    evaluate_status, is_legal_move, legal_destinations, Board, BoardStatus, Color, Difficulty,
    Move, PieceKind, Square,
};
use chrono::Utc;
use parking_lot::Mutex;
use rand::Rng;
use shared::protocol::{AiRequest, GameId, GameRecord, GameStatus, PlayerId, Winner};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const GAME_CODE_LEN: usize = 6;
const MAX_CODE_ATTEMPTS: u32 = 16;

/// Six upper-case letters
pub fn generate_game_code<R: Rng + ?Sized>(rng: &mut R) -> GameId {
    (0..GAME_CODE_LEN)
        .map(|_| rng.random_range(b'A'..=b'Z') as char)
        .collect()
}

/// Unique player id: display name plus a random suffix
pub fn generate_player_id(display_name: &str) -> PlayerId {
    format!("{}-{}", display_name, Uuid::new_v4().simple())
}

/// Local view of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    WaitingForOpponent,
    Active,
    Completed,
    Ended,
}

impl From<GameStatus> for SyncPhase {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Waiting => SyncPhase::WaitingForOpponent,
            GameStatus::Active => SyncPhase::Active,
            GameStatus::Completed => SyncPhase::Completed,
            GameStatus::Ended => SyncPhase::Ended,
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    game_id: Option<GameId>,
    local_color: Option<Color>,
    phase: SyncPhase,
    /// What the UI sees: last reconciled record or an optimistic successor
    cached: Option<GameRecord>,
    /// Last revision known to be in the store; rollback target
    reconciled: Option<GameRecord>,
    terminal_notified: bool,
    detached: bool,
}

pub struct TurnSyncEngine {
    store: Arc<dyn GameStore>,
    player_id: PlayerId,
    retry: RetryPolicy,
    observer: Arc<dyn GameObserver>,
    ai: Option<AiWorker>,
    session: Mutex<Session>,
    move_in_flight: AtomicBool,
    creation_in_flight: AtomicBool,
    feed_task: Mutex<Option<JoinHandle<()>>>,
    record_tx: watch::Sender<Option<GameRecord>>,
}

impl TurnSyncEngine {
    pub fn new(
        store: Arc<dyn GameStore>,
        player_id: impl Into<PlayerId>,
        settings: &SyncSettings,
    ) -> Self {
        let (record_tx, _) = watch::channel(None);
        Self {
            store,
            player_id: player_id.into(),
            retry: RetryPolicy::from_settings(settings),
            observer: Arc::new(LoggingObserver),
            ai: None,
            session: Mutex::new(Session::default()),
            move_in_flight: AtomicBool::new(false),
            creation_in_flight: AtomicBool::new(false),
            feed_task: Mutex::new(None),
            record_tx,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn GameObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_ai_worker(mut self, worker: AiWorker) -> Self {
        self.ai = Some(worker);
        self
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn phase(&self) -> SyncPhase {
        self.session.lock().phase
    }

    pub fn local_color(&self) -> Option<Color> {
        self.session.lock().local_color
    }

    pub fn game_id(&self) -> Option<GameId> {
        self.session.lock().game_id.clone()
    }

    /// Cached record (possibly optimistic)
    pub fn record(&self) -> Option<GameRecord> {
        self.session.lock().cached.clone()
    }

    pub fn board(&self) -> Option<Board> {
        self.session
            .lock()
            .cached
            .as_ref()
            .map(|record| record.board.positions)
    }

    pub fn is_detached(&self) -> bool {
        self.session.lock().detached
    }

    /// Whether the local player may move right now. Re-derived from the
    /// cached record on every call.
    pub fn can_move(&self) -> bool {
        let s = self.session.lock();
        match (&s.cached, s.local_color) {
            (Some(record), Some(local)) => {
                !s.detached
                    && record.game_state == GameStatus::Active
                    && record.current_player == local
            }
            _ => false,
        }
    }

    /// Watch the cached record
    pub fn watch(&self) -> watch::Receiver<Option<GameRecord>> {
        self.record_tx.subscribe()
    }

    /// Whether a change-feed listener is running
    pub fn feed_active(&self) -> bool {
        self.feed_task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Destinations to highlight for the piece on `from`. Empty unless the
    /// local player owns the turn and the piece.
    pub fn legal_destinations(&self, from: Square) -> SyncResult<Vec<Square>> {
        let Ok((record, local)) = self.turn_snapshot() else {
            return Ok(Vec::new());
        };
        let board = record.board.positions;
        if board.color_at(from) != Some(local) {
            return Ok(Vec::new());
        }
        Ok(legal_destinations(from, &board)?)
    }

    // ========================================================================
    // Create / join
    // ========================================================================

    /// Create a game and take the White seat. Returns the game code.
    pub async fn create_game(self: &Arc<Self>) -> SyncResult<GameId> {
        if self.creation_in_flight.swap(true, Ordering::AcqRel) {
            warn!("[SYNC] Create ignored: a creation is already in flight");
            return Err(SyncError::CreationInFlight);
        }
        let result = self.create_game_inner().await;
        self.creation_in_flight.store(false, Ordering::Release);

        if let Err(e) = &result {
            self.observer
                .on_status_message(&format!("Could not create game: {}", e));
        }
        result
    }

    async fn create_game_inner(self: &Arc<Self>) -> SyncResult<GameId> {
        self.ensure_free_for(None)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let game_id = generate_game_code(&mut rand::rng());
            if self.store.fetch(&game_id).await?.is_some() {
                debug!("[SYNC] Game code {} taken (attempt {})", game_id, attempt);
                continue;
            }

            // Subscribe before the record exists so no revision is missed
            let feed = self.store.subscribe(&game_id).await?;
            let record =
                GameRecord::new_waiting(game_id.clone(), self.player_id.clone(), Utc::now());
            match self.store.insert(record.clone()).await {
                Ok(()) => {}
                Err(StoreError::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e.into()),
            }

            info!("[SYNC] Created game {} as white", game_id);
            self.attach(record, Color::White, feed);
            self.observer.on_status_message(&format!(
                "Game {} created, waiting for opponent",
                game_id
            ));
            return Ok(game_id);
        }

        Err(SyncError::CodeExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Join a waiting game as Black, or re-attach to a seat already held
    pub async fn join_game(self: &Arc<Self>, game_id: &str) -> SyncResult<Color> {
        let game_id = game_id.trim().to_ascii_uppercase();
        let result = self.join_game_inner(&game_id).await;
        if let Err(e) = &result {
            warn!("[SYNC] Join {} rejected: {}", game_id, e);
            self.observer
                .on_status_message(&format!("Could not join {}: {}", game_id, e));
        }
        result
    }

    async fn join_game_inner(self: &Arc<Self>, game_id: &str) -> SyncResult<Color> {
        self.ensure_free_for(Some(game_id))?;

        let feed = self.store.subscribe(game_id).await?;
        let record = self
            .store
            .fetch(game_id)
            .await?
            .ok_or_else(|| SyncError::GameNotFound {
                game_id: game_id.to_string(),
            })?;

        if let Some(color) = record.color_of(&self.player_id) {
            info!("[SYNC] Re-attached to {} as {}", game_id, color);
            self.attach(record, color, feed);
            return Ok(color);
        }

        match record.game_state {
            GameStatus::Waiting if record.black_player.is_none() => {}
            GameStatus::Completed | GameStatus::Ended => {
                return Err(SyncError::GameFinished {
                    game_id: game_id.to_string(),
                })
            }
            _ => {
                return Err(SyncError::GameFull {
                    game_id: game_id.to_string(),
                })
            }
        }

        let mut joined = record.clone();
        joined.black_player = Some(self.player_id.clone());
        joined.game_state = GameStatus::Active;
        joined.updated_at = record.next_timestamp(Utc::now());
        self.store.write(joined.clone()).await?;

        info!("[SYNC] Joined {} as black", game_id);
        self.attach(joined, Color::Black, feed);
        self.observer
            .on_status_message(&format!("Joined game {} as black", game_id));
        Ok(Color::Black)
    }

    fn ensure_free_for(&self, target: Option<&str>) -> SyncResult<()> {
        let s = self.session.lock();
        match &s.game_id {
            Some(current) if !s.detached && Some(current.as_str()) != target => {
                Err(SyncError::AlreadyInGame {
                    game_id: current.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    fn attach(self: &Arc<Self>, record: GameRecord, color: Color, feed: ChangeFeed) {
        self.stop_feed();

        let announce = {
            let mut s = self.session.lock();
            let rejoin = !s.detached && s.game_id.as_deref() == Some(record.game_id.as_str());
            let terminal_notified = rejoin && s.terminal_notified;
            *s = Session {
                game_id: Some(record.game_id.clone()),
                local_color: Some(color),
                phase: SyncPhase::from(record.game_state),
                cached: Some(record.clone()),
                reconciled: Some(record.clone()),
                terminal_notified,
                detached: false,
            };
            let announce = record.game_state.is_finished() && !s.terminal_notified;
            if announce {
                s.terminal_notified = true;
            }
            announce
        };

        self.publish(&record);
        if announce {
            self.announce_terminal(&record, color);
        }

        let handle = feed::spawn_listener(
            Arc::downgrade(self),
            Arc::clone(&self.store),
            record.game_id.clone(),
            feed,
            self.retry,
        );
        *self.feed_task.lock() = Some(handle);
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Propose a move for the local player.
    ///
    /// A pawn reaching the last rank promotes to `promotion`, or to a queen
    /// when none is given. Rejections leave both the cached and the stored
    /// record untouched. A failed write rolls the cached record back to the
    /// last reconciled revision.
    pub async fn propose_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> SyncResult<Move> {
        if self.move_in_flight.swap(true, Ordering::AcqRel) {
            warn!("[SYNC] Move {}-{} rejected: another move is in flight", from, to);
            return Err(SyncError::MoveInFlight);
        }
        let result = self.submit_move(from, to, promotion).await;
        self.move_in_flight.store(false, Ordering::Release);

        if let Err(e) = &result {
            self.observer.on_status_message(&e.to_string());
        }
        result
    }

    async fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> SyncResult<Move> {
        let (record, local) = self.turn_snapshot()?;
        let board = record.board.positions;

        let piece = board.piece_at(from).ok_or_else(|| SyncError::InvalidMove {
            message: format!("no piece on {}", from),
        })?;
        if piece.color != local {
            return Err(SyncError::InvalidMove {
                message: format!("{} does not belong to {}", piece, local),
            });
        }
        if !is_legal_move(piece, from, to, &board)? {
            warn!("[SYNC] Illegal move {} {}-{}", piece, from, to);
            return Err(SyncError::InvalidMove {
                message: format!("{} cannot move {}-{}", piece, from, to),
            });
        }

        let mut mv = Move::new(piece, from, to);
        mv.is_capture = board.piece_at(to).is_some();
        mv.promotion = promotion_for(piece.kind, local, to, promotion)?;

        let mut next = record.clone();
        next.board.apply(&mv)?;
        let opponent = local.opponent();
        let status = evaluate_status(opponent, &next.board.positions)?;
        match status {
            BoardStatus::Checkmate => {
                next.game_state = GameStatus::Completed;
                next.winner = Some(Winner::from(local));
            }
            BoardStatus::Stalemate => {
                next.game_state = GameStatus::Completed;
                next.winner = Some(Winner::Draw);
            }
            BoardStatus::Check | BoardStatus::Ongoing => {}
        }
        next.current_player = opponent;
        next.last_move = Some(mv);
        next.updated_at = record.next_timestamp(Utc::now());

        // Optimistic apply
        {
            let mut s = self.session.lock();
            if s.detached {
                return Err(SyncError::Detached {
                    game_id: next.game_id,
                });
            }
            s.cached = Some(next.clone());
            s.phase = SyncPhase::from(next.game_state);
        }
        self.publish(&next);

        if let Err(e) = self.store.write(next.clone()).await {
            error!("[SYNC] Write of {} for {} failed: {}", mv, next.game_id, e);
            self.rollback();
            self.observer
                .on_status_message("Move could not be saved, please retry");
            return Err(e.into());
        }

        if self.is_detached() {
            return Err(SyncError::Detached {
                game_id: next.game_id,
            });
        }

        info!("[SYNC] {} played {} ({:?})", local, mv, status);
        if status == BoardStatus::Check {
            self.observer
                .on_status_message(&format!("Check: {} king is attacked", opponent));
        }
        Ok(mv)
    }

    /// Let the AI worker pick the local player's move and propose it.
    ///
    /// `Ok(None)` when the local player has no legal move; nothing is written.
    pub async fn play_ai_turn(&self, difficulty: Difficulty) -> SyncResult<Option<Move>> {
        let worker = self.ai.as_ref().ok_or(SyncError::AiUnavailable)?;
        let (record, local) = self.turn_snapshot()?;

        let response = worker
            .request(AiRequest {
                board: record.board.positions,
                difficulty,
                current_color: local,
            })
            .await?;

        if self.is_detached() {
            return Err(SyncError::Detached {
                game_id: record.game_id,
            });
        }

        match response.chosen {
            Some(mv) => self.propose_move(mv.from, mv.to, mv.promotion).await.map(Some),
            None => {
                self.observer
                    .on_status_message(&format!("{} has no legal move", local));
                Ok(None)
            }
        }
    }

    /// Cached record and local color, if the local player owns the turn
    fn turn_snapshot(&self) -> SyncResult<(GameRecord, Color)> {
        let s = self.session.lock();
        let game_id = s.game_id.clone().ok_or(SyncError::NotAttached)?;
        if s.detached {
            return Err(SyncError::Detached { game_id });
        }
        let record = s.cached.clone().ok_or(SyncError::NotAttached)?;
        let local = s.local_color.ok_or(SyncError::NotAttached)?;

        if record.game_state != GameStatus::Active {
            return Err(SyncError::GameNotActive {
                status: record.game_state,
            });
        }
        if record.current_player != local {
            return Err(SyncError::NotYourTurn {
                to_move: record.current_player,
            });
        }
        Ok((record, local))
    }

    fn rollback(&self) {
        let restored = {
            let mut s = self.session.lock();
            if s.detached {
                return;
            }
            s.cached = s.reconciled.clone();
            if let Some(record) = &s.cached {
                s.phase = SyncPhase::from(record.game_state);
            }
            s.cached.clone()
        };
        if let Some(record) = restored {
            debug!("[SYNC] Rolled back to revision {}", record.updated_at);
            self.publish(&record);
        }
    }

    // ========================================================================
    // Reconcile
    // ========================================================================

    /// Replace the cached record with a revision from the store.
    ///
    /// Revisions for another game, arriving after detachment, or older than
    /// the last reconciled one are ignored. Returns whether the revision was
    /// applied.
    pub fn reconcile(&self, record: GameRecord) -> bool {
        let (local, displaced, joined, announce) = {
            let mut s = self.session.lock();
            if s.detached || s.game_id.as_deref() != Some(record.game_id.as_str()) {
                debug!("[FEED] Ignoring revision for {}", record.game_id);
                return false;
            }
            if let Some(current) = &s.reconciled {
                if record.updated_at < current.updated_at {
                    debug!(
                        "[FEED] Ignoring stale revision {} < {}",
                        record.updated_at, current.updated_at
                    );
                    return false;
                }
            }
            let Some(local) = s.local_color else {
                return false;
            };

            let displaced = record.player(local).map(String::as_str) != Some(self.player_id.as_str());
            let previous = s.phase;
            s.reconciled = Some(record.clone());
            s.cached = Some(record.clone());
            s.phase = SyncPhase::from(record.game_state);

            let joined = previous == SyncPhase::WaitingForOpponent && s.phase == SyncPhase::Active;
            let announce = record.game_state.is_finished() && !s.terminal_notified;
            if announce {
                s.terminal_notified = true;
            }
            (local, displaced, joined, announce)
        };

        debug!(
            "[FEED] Reconciled {}: {:?}, {} to move",
            record.game_id, record.game_state, record.current_player
        );
        self.publish(&record);

        if displaced {
            warn!("[SYNC] Seat {} of {} taken by another player", local, record.game_id);
            self.observer
                .on_status_message("Another player took this seat");
            self.detach();
            return true;
        }
        if joined {
            info!("[SYNC] Opponent joined {}", record.game_id);
            self.observer.on_status_message("Opponent joined, white to move");
        }
        if announce {
            self.announce_terminal(&record, local);
        }
        true
    }

    fn announce_terminal(&self, record: &GameRecord, local: Color) {
        match record.winner {
            Some(winner) => {
                let message = match (record.game_state, winner) {
                    (GameStatus::Ended, _) => format!("Game abandoned, {:?} wins", winner),
                    (_, Winner::Draw) => "Stalemate, the game is drawn".to_string(),
                    _ => format!("Checkmate, {:?} wins", winner),
                };
                info!("[SYNC] {} finished: {}", record.game_id, message);
                self.observer.on_status_message(&message);
                self.observer
                    .on_terminal_state(winner, Outcome::for_seat(winner, local));
            }
            None => {
                info!("[SYNC] {} ended without a result", record.game_id);
                self.observer.on_status_message("Game ended");
            }
        }
    }

    fn publish(&self, record: &GameRecord) {
        self.record_tx.send_replace(Some(record.clone()));
        self.observer.on_board_changed(&record.board.positions);
    }

    // ========================================================================
    // Leave / detach
    // ========================================================================

    /// Abandon the game and detach.
    ///
    /// - `waiting`: writes `ended` without a winner
    /// - `active`: writes `ended` with the opponent as winner and reports a loss
    /// - finished: only detaches
    ///
    /// A failed write leaves the engine attached so the caller can retry.
    /// Rejected with [`SyncError::MoveInFlight`] while a proposal is pending,
    /// so a late move write cannot overwrite the `ended` record.
    pub async fn leave_game(&self) -> SyncResult<()> {
        if self.move_in_flight.swap(true, Ordering::AcqRel) {
            warn!("[SYNC] Leave rejected: a move is in flight");
            return Err(SyncError::MoveInFlight);
        }
        let result = self.leave_game_inner().await;
        self.move_in_flight.store(false, Ordering::Release);
        result
    }

    async fn leave_game_inner(&self) -> SyncResult<()> {
        let (record, local) = {
            let s = self.session.lock();
            // With the latch held, the cache holds no unwritten move
            match (&s.cached, s.local_color) {
                (Some(record), Some(local)) if !s.detached => (record.clone(), local),
                _ => return Ok(()),
            }
        };

        let winner = match record.game_state {
            GameStatus::Active => Some(Winner::from(local.opponent())),
            GameStatus::Waiting => None,
            GameStatus::Completed | GameStatus::Ended => {
                self.detach();
                return Ok(());
            }
        };

        let mut ended = record.clone();
        ended.game_state = GameStatus::Ended;
        ended.winner = winner;
        ended.updated_at = record.next_timestamp(Utc::now());
        self.store.write(ended.clone()).await?;
        info!("[SYNC] Left {} as {}", record.game_id, local);

        let announce = {
            let mut s = self.session.lock();
            let announce = !s.terminal_notified;
            s.terminal_notified = true;
            s.reconciled = Some(ended.clone());
            s.cached = Some(ended.clone());
            announce
        };
        self.publish(&ended);
        if announce {
            if let Some(winner) = winner {
                self.observer
                    .on_terminal_state(winner, Outcome::for_seat(winner, local));
            }
        }

        self.detach();
        Ok(())
    }

    /// Stop following the game: unsubscribe and cancel pending AI work.
    /// Nothing is written.
    pub fn detach(&self) {
        let game_id = {
            let mut s = self.session.lock();
            if s.detached || s.game_id.is_none() {
                return;
            }
            s.detached = true;
            if s.phase != SyncPhase::Completed {
                s.phase = SyncPhase::Ended;
            }
            s.game_id.clone()
        };

        self.stop_feed();
        if let Some(worker) = &self.ai {
            worker.cancel_pending();
        }
        info!("[SYNC] Detached from {:?}", game_id);
    }

    /// Feed listener exhausted its retry budget
    pub(crate) fn feed_lost(&self, game_id: &str) {
        {
            let s = self.session.lock();
            if s.detached || s.game_id.as_deref() != Some(game_id) {
                return;
            }
        }
        error!("[FEED] Giving up on change feed for {}", game_id);
        self.observer.on_status_message(&format!(
            "Lost connection to game {}, rejoin to resume",
            game_id
        ));
    }

    fn stop_feed(&self) {
        if let Some(handle) = self.feed_task.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for TurnSyncEngine {
    fn drop(&mut self) {
        self.stop_feed();
    }
}

/// Promotion piece for a move, validating an explicit request
fn promotion_for(
    kind: PieceKind,
    color: Color,
    to: Square,
    requested: Option<PieceKind>,
) -> SyncResult<Option<PieceKind>> {
    let reaches_last_rank = kind == PieceKind::Pawn && to.row() == color.promotion_row();
    match (reaches_last_rank, requested) {
        (false, None) => Ok(None),
        (false, Some(_)) => Err(SyncError::InvalidMove {
            message: "only a pawn on the last rank can promote".to_string(),
        }),
        (true, None) => Ok(Some(PieceKind::Queen)),
        (true, Some(PieceKind::Pawn | PieceKind::King)) => Err(SyncError::InvalidMove {
            message: "a pawn cannot promote to a pawn or king".to_string(),
        }),
        (true, Some(kind)) => Ok(Some(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    #[test]
    fn test_game_code_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let code = generate_game_code(&mut rng);
        assert_eq!(code.len(), GAME_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_player_ids_are_unique() {
        let a = generate_player_id("alice");
        let b = generate_player_id("alice");
        assert!(a.starts_with("alice-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_promotion_rules() {
        assert_eq!(
            promotion_for(PieceKind::Pawn, Color::White, sq("e8"), None).expect("auto queen"),
            Some(PieceKind::Queen)
        );
        assert_eq!(
            promotion_for(PieceKind::Pawn, Color::Black, sq("a1"), Some(PieceKind::Knight))
                .expect("under-promotion"),
            Some(PieceKind::Knight)
        );
        assert!(promotion_for(PieceKind::Pawn, Color::White, sq("e8"), Some(PieceKind::King)).is_err());
        assert!(promotion_for(PieceKind::Rook, Color::White, sq("e8"), Some(PieceKind::Queen)).is_err());
        assert_eq!(
            promotion_for(PieceKind::Pawn, Color::White, sq("e4"), None).expect("plain push"),
            None
        );
    }

    #[test]
    fn test_phase_from_status() {
        assert_eq!(SyncPhase::from(GameStatus::Waiting), SyncPhase::WaitingForOpponent);
        assert_eq!(SyncPhase::from(GameStatus::Ended), SyncPhase::Ended);
    }
}
