//! Geo Scoring
//!
//! Converts a map click into a great-circle distance and a bounded score,
//! and classifies an arbitrary point to the nearest country centroid.
//!
//! # Scoring Curve
//!
//! ```text
//! score(d) = round(5000 · exp(-d / 2000))
//! ```
//!
//! | Distance | Score |
//! |----------|-------|
//! | 0 km     | 5000  |
//! | 500 km   | 3894  |
//! | 2000 km  | 1839  |
//! | 5000 km  | 410   |
//! | 15000 km | 3     |

use country_data::Country;
use std::f64::consts::PI;
use thiserror::Error;

pub mod pin;

pub use country_data::GeoPoint;
pub use pin::{PinOutcome, PinSession};

/// Mean Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Score for a perfect guess
pub const MAX_SCORE: u32 = 5000;

/// Distance decay constant (km)
pub const SCORE_DECAY_KM: f64 = 2000.0;

#[derive(Error, Debug, PartialEq)]
pub enum ScoringError {
    #[error("No eligible countries to play")]
    InsufficientData,
    #[error("This round already has a guess")]
    AlreadyGuessed,
}

pub type Result<T> = std::result::Result<T, ScoringError>;

/// Haversine distance between two points in km
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat * PI / 180.0;
    let lat2_rad = b.lat * PI / 180.0;
    let dlat = (b.lat - a.lat) * PI / 180.0;
    let dlon = (b.lon - a.lon) * PI / 180.0;

    let h = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Score a guess by its distance from the target, in [0, 5000]
pub fn score_from_distance_km(distance_km: f64) -> u32 {
    if distance_km.is_nan() {
        return 0;
    }
    let d = distance_km.max(0.0);
    (MAX_SCORE as f64 * (-d / SCORE_DECAY_KM).exp()).round() as u32
}

/// Normalised equirectangular map position (origin top-left) to a point
pub fn pixel_to_lat_lon(x: f64, y: f64) -> GeoPoint {
    GeoPoint::new(90.0 - y * 180.0, x * 360.0 - 180.0)
}

/// Point to normalised equirectangular map position (x, y)
pub fn lat_lon_to_pixel(point: GeoPoint) -> (f64, f64) {
    ((point.lon + 180.0) / 360.0, (90.0 - point.lat) / 180.0)
}

/// Squared planar distance in degrees², longitude scaled by the
/// candidate's latitude. Only meaningful for ranking.
pub fn planar_distance_sq(candidate: GeoPoint, query: GeoPoint) -> f64 {
    let dlat = query.lat - candidate.lat;
    let dlon = (query.lon - candidate.lon) * (candidate.lat * PI / 180.0).cos();
    dlat * dlat + dlon * dlon
}

/// Result of a nearest-centroid lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch<'a> {
    pub country: &'a Country,
    /// Planar ranking metric (degrees²)
    pub metric: f64,
}

impl NearestMatch<'_> {
    /// Great-circle distance from the query point to the matched centroid
    pub fn distance_km(&self, query: GeoPoint) -> f64 {
        great_circle_distance_km(query, self.country.centroid)
    }
}

/// Nearest country centroid to `point`, first wins on ties.
/// Returns `None` for an empty candidate list.
pub fn nearest_country<'a, I>(point: GeoPoint, candidates: I) -> Option<NearestMatch<'a>>
where
    I: IntoIterator<Item = &'a Country>,
{
    let mut best: Option<NearestMatch<'a>> = None;
    for country in candidates {
        let metric = planar_distance_sq(country.centroid, point);
        if best.as_ref().map_or(true, |b| metric < b.metric) {
            best = Some(NearestMatch { country, metric });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::{Continent, CountryTable};

    fn country(code: &str, lat: f64, lon: f64) -> Country {
        Country::new(code, code, "Cap", GeoPoint::new(lat, lon), Continent::Europe, code)
    }

    #[test]
    fn test_haversine() {
        // NYC to London: ~5,570 km
        let nyc = GeoPoint::new(40.7128, -74.006);
        let london = GeoPoint::new(51.5074, -0.1278);
        let dist = great_circle_distance_km(nyc, london);
        assert!((dist - 5570.0).abs() < 50.0, "NYC-London: {}", dist);

        // Same point: 0 km
        assert!(great_circle_distance_km(nyc, nyc).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_antipodal() {
        let d = great_circle_distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_score_curve() {
        assert_eq!(score_from_distance_km(0.0), 5000);
        assert_eq!(score_from_distance_km(2000.0), 1839);
        assert_eq!(score_from_distance_km(500.0), 3894);
        assert!(score_from_distance_km(14_000.0) > 0);
        assert_eq!(score_from_distance_km(40_000.0), 0);
        assert_eq!(score_from_distance_km(-5.0), 5000);
        assert_eq!(score_from_distance_km(f64::NAN), 0);
    }

    #[test]
    fn test_pixel_projection() {
        assert_eq!(pixel_to_lat_lon(0.5, 0.5), GeoPoint::new(0.0, 0.0));
        assert_eq!(pixel_to_lat_lon(0.0, 0.0), GeoPoint::new(90.0, -180.0));
        assert_eq!(pixel_to_lat_lon(1.0, 1.0), GeoPoint::new(-90.0, 180.0));
        assert_eq!(lat_lon_to_pixel(GeoPoint::new(0.0, 0.0)), (0.5, 0.5));
    }

    #[test]
    fn test_nearest_empty() {
        let empty: Vec<Country> = Vec::new();
        assert!(nearest_country(GeoPoint::new(0.0, 0.0), &empty).is_none());
    }

    #[test]
    fn test_nearest_single_candidate() {
        let only = vec![country("aa", 10.0, 10.0)];
        let m = nearest_country(GeoPoint::new(-60.0, 170.0), &only).unwrap();
        assert_eq!(m.country.code, "aa");
    }

    #[test]
    fn test_nearest_at_centroid() {
        let table = CountryTable::with_defaults();
        let de = table.get("de").unwrap();
        let m = nearest_country(de.centroid, table.iter()).unwrap();
        assert_eq!(m.country.code, "de");
        assert_eq!(m.metric, 0.0);
        assert_eq!(m.distance_km(de.centroid), 0.0);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let candidates = vec![country("aa", 0.0, 10.0), country("bb", 0.0, -10.0)];
        let m = nearest_country(GeoPoint::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(m.country.code, "aa");
    }

    #[test]
    fn test_nearest_click_near_lyon() {
        let table = CountryTable::with_defaults();
        let m = nearest_country(GeoPoint::new(45.76, 4.84), table.iter()).unwrap();
        assert_eq!(m.country.code, "fr");
    }
}
