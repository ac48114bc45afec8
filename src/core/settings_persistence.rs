//! Settings persistence system
//!
//! Saves and loads [`SyncSettings`] to/from a JSON file and applies
//! environment overrides on top.
//!
//! # File Location
//!
//! Settings are stored in `settings.json` in the user's configuration
//! directory, resolved through [`ProjectDirs`]. When no configuration
//! directory can be found the file lives in the working directory.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings and are logged
//! - Save failures are returned to the caller as [`CoreError`]
//!
//! # Environment
//!
//! After `dotenvy::dotenv()` has populated the process environment,
//! [`SyncSettings::with_env_overrides`] reads:
//!
//! | Variable                   | Field                  |
//! |----------------------------|------------------------|
//! | `TURNCHESS_RETRY_DELAY_MS` | `resubscribe_delay_ms` |
//! | `TURNCHESS_RETRY_BUDGET`   | `resubscribe_budget` (`none` = unbounded) |
//! | `TURNCHESS_DIFFICULTY`     | `ai_difficulty`        |

use crate::core::error::{CoreError, CoreResult};
use chess_engine::Difficulty;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

pub const ENV_RETRY_DELAY_MS: &str = "TURNCHESS_RETRY_DELAY_MS";
pub const ENV_RETRY_BUDGET: &str = "TURNCHESS_RETRY_BUDGET";
pub const ENV_DIFFICULTY: &str = "TURNCHESS_DIFFICULTY";

/// User preferences for the sync client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SyncSettings {
    /// Name shown to the opponent; the player id is derived from it
    pub display_name: String,

    /// Flat delay between change-feed resubscribe attempts
    pub resubscribe_delay_ms: u64,

    /// Consecutive failed attempts before the feed is given up.
    /// `None` retries forever.
    pub resubscribe_budget: Option<u32>,

    /// Difficulty used when the client plays AI turns
    pub ai_difficulty: Difficulty,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            display_name: "player".to_string(),
            resubscribe_delay_ms: 500,
            resubscribe_budget: Some(10),
            ai_difficulty: Difficulty::Easy,
        }
    }
}

impl SyncSettings {
    pub fn resubscribe_delay(&self) -> Duration {
        Duration::from_millis(self.resubscribe_delay_ms)
    }

    /// Apply `TURNCHESS_*` overrides from the process environment
    pub fn with_env_overrides(self) -> CoreResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in
    /// production, a map in tests).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_RETRY_DELAY_MS) {
            self.resubscribe_delay_ms = value
                .trim()
                .parse()
                .map_err(|_| invalid_override(ENV_RETRY_DELAY_MS, &value))?;
        }

        if let Some(value) = lookup(ENV_RETRY_BUDGET) {
            let trimmed = value.trim();
            self.resubscribe_budget = if trimmed.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    trimmed
                        .parse()
                        .map_err(|_| invalid_override(ENV_RETRY_BUDGET, &value))?,
                )
            };
        }

        if let Some(value) = lookup(ENV_DIFFICULTY) {
            // Difficulty parsing is total: anything but "hard" is easy
            if let Ok(difficulty) = value.parse() {
                self.ai_difficulty = difficulty;
            }
        }

        Ok(self)
    }
}

fn invalid_override(key: &str, value: &str) -> CoreError {
    CoreError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Helper to resolve the settings file path
///
/// Returns a path to `settings.json` in the user's configuration directory,
/// e.g. `~/.config/turnchess/settings.json` on Linux.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "turnchess", "turnchess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        // Fallback to current directory
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from the default location
pub fn load_settings() -> SyncSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_settings_from(path: &Path) -> SyncSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return SyncSettings::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<SyncSettings>(&contents) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                SyncSettings::default()
            }
        },
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.",
                path, e
            );
            SyncSettings::default()
        }
    }
}

/// Save settings to the default location
pub fn save_settings(settings: &SyncSettings) -> CoreResult<()> {
    save_settings_to(settings, &settings_path())
}

/// Save settings as pretty JSON, creating the parent directory if needed
pub fn save_settings_to(settings: &SyncSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
