//! Command-line interface for turnchess.

use chess_engine::{Color, Difficulty};
use clap::{Parser, Subcommand, ValueEnum};

/// turnchess - chess rules engine with turn-synchronized multiplayer
#[derive(Parser, Debug)]
#[command(name = "turnchess")]
#[command(about = "Chess rules engine with a networked turn sync client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play two AI clients against each other over an in-memory store
    Selfplay {
        /// AI difficulty for both sides (defaults to the configured one)
        #[arg(short, long, value_enum)]
        difficulty: Option<DifficultyArg>,

        /// Stop after this many plies
        #[arg(long, default_value = "200")]
        max_plies: u32,

        /// Seed for reproducible easy-mode games
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the legal moves of the initial position
    Moves {
        /// Side to list moves for
        #[arg(short, long, value_enum, default_value = "white")]
        color: ColorArg,
    },

    /// Show the effective settings
    Settings {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyArg {
    Easy,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    White,
    Black,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::White => Color::White,
            ColorArg::Black => Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_selfplay() {
        let cli = Cli::try_parse_from(["turnchess", "selfplay", "-d", "hard", "--max-plies", "10"])
            .expect("valid arguments");
        match cli.command {
            Command::Selfplay {
                difficulty,
                max_plies,
                seed,
            } => {
                assert_eq!(difficulty.map(Difficulty::from), Some(Difficulty::Hard));
                assert_eq!(max_plies, 10);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_moves_defaults_to_white() {
        let cli = Cli::try_parse_from(["turnchess", "moves"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Moves { color: ColorArg::White }));
    }
}
