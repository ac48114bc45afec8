//! Core module - application infrastructure
//!
//! Settings persistence and the error types shared by the client layers.
//!
//! - [`SyncSettings`] - User preferences for the sync client (retry policy,
//!   AI difficulty, display name), persisted as JSON
//! - [`CoreError`] - Failures while loading or saving those preferences

pub mod error;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use settings_persistence::{
    load_settings, load_settings_from, save_settings, save_settings_to, settings_path,
    SyncSettings,
};
