//! Game Settings
//!
//! Everything GeoQuest keeps between runs: display preferences, per-game
//! stats and the optional online leaderboard. Storage is a
//! [`KeyValueStore`] capability handed in by the front end; the game crates
//! never touch it.
//!
//! # Stored Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `geo-quest-theme` | theme id |
//! | `geo-quest-continent` | `All` or a continent name |
//! | `geo-quest-player-name` | trimmed display name |
//! | `geo-quest-reduce-motion` | `true` / `false` |
//! | `geo-quest-stats` | JSON object keyed by game |

use thiserror::Error;

pub mod config;
pub mod leaderboard;
pub mod prefs;
pub mod stats;
pub mod store;

pub use config::GameConfig;
pub use leaderboard::{
    submit_detached, LeaderboardClient, LeaderboardError, NewScore, ScoreRow, ScoreSink,
};
pub use prefs::{Preferences, Theme};
pub use stats::{GameStatEntry, GameStats};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

pub const THEME_KEY: &str = "geo-quest-theme";
pub const CONTINENT_KEY: &str = "geo-quest-continent";
pub const PLAYER_NAME_KEY: &str = "geo-quest-player-name";
pub const REDUCE_MOTION_KEY: &str = "geo-quest-reduce-motion";
pub const STATS_KEY: &str = "geo-quest-stats";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
