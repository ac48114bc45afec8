use anyhow::{bail, Context};
use chess_engine::{all_legal_moves, Board, Color, Difficulty};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::protocol::{GameRecord, GameStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turnchess::cli::{Cli, Command};
use turnchess::core::{load_settings, save_settings, settings_path, SyncSettings};
use turnchess::game::ai::AiWorker;
use turnchess::networking::{generate_player_id, GameStore, MemoryStore, TurnSyncEngine};

/// Longest wait for a client to observe the other side's move
const SYNC_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings()
        .with_env_overrides()
        .context("invalid TURNCHESS_* override")?;

    match cli.command {
        Command::Selfplay {
            difficulty,
            max_plies,
            seed,
        } => {
            let difficulty = difficulty.map_or(settings.ai_difficulty, Difficulty::from);
            selfplay(&settings, difficulty, max_plies, seed).await
        }
        Command::Moves { color } => {
            let color = Color::from(color);
            let board = Board::initial();
            let moves = all_legal_moves(color, &board)?;
            println!("{}\n", board);
            println!("{} legal moves for {}:", moves.len(), color);
            for mv in moves {
                println!("  {}", mv);
            }
            Ok(())
        }
        Command::Settings { save } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if save {
                save_settings(&settings)?;
                println!("saved to {}", settings_path().display());
            }
            Ok(())
        }
    }
}

fn spawn_worker(seed: Option<u64>) -> std::io::Result<AiWorker> {
    match seed {
        Some(seed) => AiWorker::spawn_with_rng(StdRng::seed_from_u64(seed)),
        None => AiWorker::spawn(),
    }
}

/// Two AI clients playing each other through one in-memory store
async fn selfplay(
    settings: &SyncSettings,
    difficulty: Difficulty,
    max_plies: u32,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let store: Arc<dyn GameStore> = Arc::new(MemoryStore::new());
    let white = Arc::new(
        TurnSyncEngine::new(
            Arc::clone(&store),
            generate_player_id(&format!("{}-white", settings.display_name)),
            settings,
        )
        .with_ai_worker(spawn_worker(seed)?),
    );
    let black = Arc::new(
        TurnSyncEngine::new(
            Arc::clone(&store),
            generate_player_id(&format!("{}-black", settings.display_name)),
            settings,
        )
        .with_ai_worker(spawn_worker(seed.map(|s| s.wrapping_add(1)))?),
    );

    let game_id = white.create_game().await?;
    black.join_game(&game_id).await?;
    info!("[SELFPLAY] Game {} started at {} difficulty", game_id, difficulty);

    let mut to_move = Color::White;
    let mut plies = 0;
    let last = loop {
        let engine = match to_move {
            Color::White => &white,
            Color::Black => &black,
        };
        let record = wait_for_turn(engine, to_move).await?;
        if record.game_state.is_finished() || plies >= max_plies {
            break record;
        }

        match engine.play_ai_turn(difficulty).await? {
            Some(mv) => info!("[SELFPLAY] {}. {} {}", plies / 2 + 1, to_move, mv),
            None => bail!("{} has no legal move but the game is still active", to_move),
        }
        plies += 1;
        to_move = to_move.opponent();
    };

    println!("{}\n", last.board.positions);
    match (last.game_state, last.winner) {
        (GameStatus::Completed, Some(winner)) => {
            println!("game {} over after {} plies: {:?}", game_id, plies, winner)
        }
        _ => println!("game {} stopped after {} plies", game_id, plies),
    }
    black.detach();
    white.detach();
    Ok(())
}

/// Wait until `engine` sees `color` to move or the game finished
async fn wait_for_turn(engine: &TurnSyncEngine, color: Color) -> anyhow::Result<GameRecord> {
    let mut rx = engine.watch();
    let seen = tokio::time::timeout(
        SYNC_TIMEOUT,
        rx.wait_for(|record| {
            record.as_ref().is_some_and(|r| {
                r.game_state.is_finished()
                    || (r.game_state == GameStatus::Active && r.current_player == color)
            })
        }),
    )
    .await
    .context("timed out waiting for the change feed")??;

    let record = seen.clone();
    record.context("engine published no record")
}
