//! Country Reference Data
//!
//! Static country records and land-border adjacency shared by every
//! GeoQuest mini-game. Tables are built once and handed out by reference;
//! nothing in this crate mutates them after construction.
//!
//! # Record Model
//!
//! | Field | Description |
//! |-------|-------------|
//! | code | ISO 3166-1 alpha-2, stored lowercase, unique |
//! | centroid | Single (lat, lon) point standing in for the whole country |
//! | continent | Filter category |
//! | population / area | Optional magnitudes for comparison games |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod builtin;
pub mod export;
pub mod loader;
pub mod table;

pub use table::{BorderTable, CountryTable};

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate country code: {0}")]
    DuplicateCode(String),
    #[error("Invalid country code: {0:?}")]
    InvalidCode(String),
    #[error("Unknown continent: {0:?}")]
    UnknownContinent(String),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Continents used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Continent {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_answer(s);
        Continent::ALL
            .into_iter()
            .find(|c| c.name().to_lowercase() == wanted)
            .ok_or_else(|| DataError::UnknownContinent(s.to_string()))
    }
}

/// Continent restriction applied to the playable country pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinentFilter {
    #[default]
    All,
    Only(Continent),
}

impl ContinentFilter {
    pub fn matches(&self, country: &Country) -> bool {
        match self {
            ContinentFilter::All => true,
            ContinentFilter::Only(c) => country.continent == *c,
        }
    }
}

impl fmt::Display for ContinentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinentFilter::All => f.write_str("All"),
            ContinentFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for ContinentFilter {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ContinentFilter::All);
        }
        s.parse().map(ContinentFilter::Only)
    }
}

/// A country record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, lowercase
    pub code: String,
    pub name: String,
    pub capital: String,
    pub centroid: GeoPoint,
    pub continent: Continent,
    /// Primary name in the country's own language (Latin script)
    pub native_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub native_name_alt: Vec<String>,
    /// Population in millions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    /// Area in km²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

impl Country {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        capital: impl Into<String>,
        centroid: GeoPoint,
        continent: Continent,
        native_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into().to_lowercase(),
            name: name.into(),
            capital: capital.into(),
            centroid,
            continent,
            native_name: native_name.into(),
            native_name_alt: Vec::new(),
            population: None,
            area: None,
        }
    }

    pub fn with_native_alts(mut self, alts: &[&str]) -> Self {
        self.native_name_alt = alts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_population(mut self, millions: Option<f64>) -> Self {
        self.population = millions;
        self
    }

    pub fn with_area(mut self, km2: Option<f64>) -> Self {
        self.area = km2;
        self
    }

    /// Flag image URL (flagcdn, 320px wide)
    pub fn flag_url(&self) -> String {
        format!("https://flagcdn.com/w320/{}.png", self.code)
    }

    /// English Wikipedia article, spaces as underscores
    pub fn wikipedia_url(&self) -> String {
        let slug = self.name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("https://en.wikipedia.org/wiki/{}", urlencoding::encode(&slug))
    }
}

/// Normalize free text for comparison: trim, lowercase, collapse whitespace
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two ASCII letters, any case
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}
