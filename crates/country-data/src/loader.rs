//! Data loading from JSON files

use crate::{BorderTable, Continent, Country, CountryTable, DataError, GeoPoint, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Raw country row from JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    code: String,
    name: String,
    capital: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    continent: String,
    native_name: Option<String>,
    #[serde(default)]
    native_name_alt: Vec<String>,
    population: Option<f64>,
    area: Option<f64>,
}

/// Load countries from a JSON array.
///
/// Rows with missing or out-of-range coordinates are skipped and counted.
/// A duplicate code or an unknown continent fails the whole load.
pub fn load_countries(path: impl AsRef<Path>) -> Result<CountryTable> {
    let path = path.as_ref();
    info!("Loading countries from {:?}", path);

    let file = File::open(path)?;
    let rows: Vec<RawCountry> = serde_json::from_reader(BufReader::new(file))?;

    let mut table = CountryTable::new();
    let mut skipped = 0;

    for row in rows {
        let centroid = match (row.lat, row.lon) {
            (Some(lat), Some(lon)) if GeoPoint::new(lat, lon).is_valid() => GeoPoint::new(lat, lon),
            _ => {
                warn!("Skipping {}: missing or invalid centroid", row.code);
                skipped += 1;
                continue;
            }
        };
        let continent: Continent = row.continent.parse()?;
        let native = row.native_name.unwrap_or_else(|| row.name.clone());
        let alts: Vec<&str> = row.native_name_alt.iter().map(String::as_str).collect();

        let country = Country::new(
            row.code,
            row.name,
            row.capital.unwrap_or_default(),
            centroid,
            continent,
            native,
        )
        .with_native_alts(&alts)
        .with_population(row.population.filter(|p| *p > 0.0))
        .with_area(row.area.filter(|a| *a > 0.0));

        table.insert(country)?;
    }

    info!(
        "Loaded {} countries ({} skipped for bad coords)",
        table.len(),
        skipped
    );

    Ok(table)
}

/// Load a border table from a JSON object of code -> [codes]
pub fn load_borders(path: impl AsRef<Path>) -> Result<BorderTable> {
    let path = path.as_ref();
    info!("Loading borders from {:?}", path);

    let file = File::open(path)?;
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(BufReader::new(file))?;

    let mut table = BorderTable::new();
    for (code, neighbours) in raw {
        if !crate::is_valid_code(&code) {
            return Err(DataError::InvalidCode(code));
        }
        table.insert(&code, &neighbours);
    }

    info!("Loaded border lists for {} countries", table.len());

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_countries() {
        let file = write_json(
            r#"[
                {"code": "FR", "name": "France", "capital": "Paris", "lat": 46.2, "lon": 2.2,
                 "continent": "Europe", "nativeName": "France", "population": 68},
                {"code": "xx", "name": "Nowhere", "continent": "Europe"},
                {"code": "us", "name": "United States", "capital": "Washington D.C.", "lat": 37.1,
                 "lon": -95.7, "continent": "North America", "nativeNameAlt": ["USA"]}
            ]"#,
        );

        let table = load_countries(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("fr").unwrap().population, Some(68.0));
        let us = table.get("US").unwrap();
        assert_eq!(us.native_name, "United States");
        assert_eq!(us.native_name_alt, vec!["USA".to_string()]);
    }

    #[test]
    fn test_load_countries_rejects_duplicates() {
        let file = write_json(
            r#"[
                {"code": "fr", "name": "France", "lat": 46.2, "lon": 2.2, "continent": "Europe"},
                {"code": "FR", "name": "France", "lat": 46.2, "lon": 2.2, "continent": "Europe"}
            ]"#,
        );
        assert!(matches!(load_countries(file.path()), Err(DataError::DuplicateCode(_))));
    }

    #[test]
    fn test_load_countries_unknown_continent() {
        let file = write_json(
            r#"[{"code": "fr", "name": "France", "lat": 46.2, "lon": 2.2,
                 "continent": "Atlantis"}]"#,
        );
        assert!(matches!(load_countries(file.path()), Err(DataError::UnknownContinent(_))));
    }

    #[test]
    fn test_load_borders() {
        let file = write_json(r#"{"fr": ["DE", "be"], "de": ["fr"]}"#);
        let borders = load_borders(file.path()).unwrap();
        assert!(borders.are_neighbours("fr", "de"));
        assert!(borders.are_neighbours("de", "fr"));
        assert!(!borders.are_neighbours("be", "fr"));
    }
}
