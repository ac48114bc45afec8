//! turnchess - chess rules engine with a networked turn synchronization client
//!
//! The rules live in the `chess_engine` crate and the persisted record in
//! `shared`. This crate adds the client side:
//!
//! - [`core`] - Settings persistence and core errors
//! - [`game`] - Background AI worker
//! - [`networking`] - Store boundary, change feed and the [`TurnSyncEngine`]
//! - [`cli`] - Command-line definitions for the `turnchess` binary
//!
//! [`TurnSyncEngine`]: networking::TurnSyncEngine

pub mod cli;
pub mod core;
pub mod game;
pub mod networking;
