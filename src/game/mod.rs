//! Game module - local game logic around the rules engine
//!
//! - [`ai`] - Background AI worker answering move requests off the async runtime
//! - [`error`] - Errors of the AI boundary

pub mod ai;
pub mod error;

pub use error::{GameError, GameResult};
