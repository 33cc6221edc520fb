//! Runtime configuration from the environment

use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = ".geoquest/settings.json";
pub const DEFAULT_HTTP_TIMEOUT_SEC: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Settings file (`GEOQUEST_SETTINGS_PATH`)
    pub settings_path: PathBuf,
    /// Leaderboard project URL (`GEOQUEST_SUPABASE_URL`)
    pub supabase_url: Option<String>,
    /// Leaderboard publishable key (`GEOQUEST_SUPABASE_KEY`)
    pub supabase_key: Option<String>,
    /// Leaderboard request timeout (`GEOQUEST_HTTP_TIMEOUT_SEC`)
    pub http_timeout_sec: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            supabase_url: None,
            supabase_key: None,
            http_timeout_sec: DEFAULT_HTTP_TIMEOUT_SEC,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let http_timeout_sec = match get("GEOQUEST_HTTP_TIMEOUT_SEC") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "GEOQUEST_HTTP_TIMEOUT_SEC={:?} is not a number, using {}",
                    raw, DEFAULT_HTTP_TIMEOUT_SEC
                );
                DEFAULT_HTTP_TIMEOUT_SEC
            }),
            None => DEFAULT_HTTP_TIMEOUT_SEC,
        };

        Self {
            settings_path: get("GEOQUEST_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH)),
            supabase_url: get("GEOQUEST_SUPABASE_URL"),
            supabase_key: get("GEOQUEST_SUPABASE_KEY"),
            http_timeout_sec,
        }
    }

    pub fn leaderboard_enabled(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}
