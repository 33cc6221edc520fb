//! Display and gameplay preferences

use crate::{
    KeyValueStore, SettingsError, CONTINENT_KEY, PLAYER_NAME_KEY, REDUCE_MOTION_KEY, THEME_KEY,
};
use country_data::ContinentFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Ocean,
    Forest,
    Sunset,
    HighContrast,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Dark,
        Theme::Light,
        Theme::Ocean,
        Theme::Forest,
        Theme::Sunset,
        Theme::HighContrast,
    ];

    /// Stored identifier
    pub fn id(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Sunset => "sunset",
            Theme::HighContrast => "highcontrast",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Ocean => "Ocean",
            Theme::Forest => "Forest",
            Theme::Sunset => "Sunset",
            Theme::HighContrast => "High contrast",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| SettingsError::InvalidValue {
                key: THEME_KEY.to_string(),
                value: s.to_string(),
            })
    }
}

/// Preferences backed by a store. Setters write through immediately; a
/// failed write is logged and the in-memory value still changes.
#[derive(Debug)]
pub struct Preferences<S: KeyValueStore> {
    store: S,
    theme: Theme,
    continent: ContinentFilter,
    player_name: String,
    reduce_motion: bool,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Read every preference, falling back to defaults for missing or
    /// unparseable values
    pub fn load(store: S) -> Self {
        let theme = read_or_default(&store, THEME_KEY, |v| v.parse::<Theme>().ok());
        let continent =
            read_or_default(&store, CONTINENT_KEY, |v| v.parse::<ContinentFilter>().ok());
        let player_name = read_or_default(&store, PLAYER_NAME_KEY, |v| Some(v.trim().to_string()));
        let reduce_motion = read_or_default(&store, REDUCE_MOTION_KEY, |v| match v {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        });

        Self {
            store,
            theme,
            continent,
            player_name,
            reduce_motion,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn continent(&self) -> ContinentFilter {
        self.continent
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Name to attach to leaderboard scores, if one is set
    pub fn display_name(&self) -> Option<&str> {
        Some(self.player_name.as_str()).filter(|n| !n.is_empty())
    }

    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.write(THEME_KEY, theme.id());
    }

    pub fn set_continent(&mut self, continent: ContinentFilter) {
        self.continent = continent;
        self.write(CONTINENT_KEY, &continent.to_string());
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.trim().to_string();
        let value = self.player_name.clone();
        self.write(PLAYER_NAME_KEY, &value);
    }

    pub fn set_reduce_motion(&mut self, on: bool) {
        self.reduce_motion = on;
        self.write(REDUCE_MOTION_KEY, if on { "true" } else { "false" });
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Could not save {}: {}", key, e);
        }
    }
}

fn read_or_default<S, T, F>(store: &S, key: &str, parse: F) -> T
where
    S: KeyValueStore,
    T: Default,
    F: FnOnce(&str) -> Option<T>,
{
    match store.get(key) {
        Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
            debug!("Ignoring stored {} = {:?}", key, raw);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            debug!("Could not read {}: {}", key, e);
            T::default()
        }
    }
}
