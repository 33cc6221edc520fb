//! Strategies for geography and guess-text inputs

use country_data::{BorderTable, CountryTable, GeoPoint};
use proptest::prelude::*;

// ============================================================================
// Coordinate Generators
// ============================================================================

/// Latitude in degrees (-90 to 90)
pub fn latitude_deg() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

/// Longitude in degrees (-180 to 180)
pub fn longitude_deg() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Any valid point on the globe
pub fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (latitude_deg(), longitude_deg()).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

/// Point away from the poles and the antimeridian
pub fn geo_point_inland() -> impl Strategy<Value = GeoPoint> {
    (-80.0f64..=80.0, -170.0f64..=170.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

/// Normalised map click (x, y) each in [0, 1]
pub fn map_fraction() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..=1.0, 0.0f64..=1.0)
}

// ============================================================================
// Distance Generators
// ============================================================================

/// Surface distance in km (0 to half the Earth's circumference)
pub fn distance_km() -> impl Strategy<Value = f64> {
    0.0f64..=20_040.0
}

/// Pair of ordered distances (near, far)
pub fn distance_pair_km() -> impl Strategy<Value = (f64, f64)> {
    (distance_km(), distance_km()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

// ============================================================================
// Dataset Generators
// ============================================================================

/// Code of a country in the built-in table
pub fn builtin_country_code() -> impl Strategy<Value = String> {
    let codes: Vec<String> = CountryTable::with_defaults()
        .iter()
        .map(|c| c.code.clone())
        .collect();
    proptest::sample::select(codes)
}

/// Code of a built-in country that lists at least one neighbour
pub fn bordered_country_code() -> impl Strategy<Value = String> {
    let borders = BorderTable::with_defaults();
    let codes: Vec<String> = borders
        .iter()
        .filter(|(_, n)| !n.is_empty())
        .map(|(code, _)| code.clone())
        .collect();
    proptest::sample::select(codes)
}

// ============================================================================
// Guess Text Generators
// ============================================================================

/// Arbitrary free text a player might type
pub fn guess_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z'\\-\\t]{0,24}"
}

/// Built-in country name with random case and padding
pub fn messy_country_name() -> impl Strategy<Value = (String, String)> {
    let names: Vec<(String, String)> = CountryTable::with_defaults()
        .iter()
        .map(|c| (c.code.clone(), c.name.clone()))
        .collect();
    (proptest::sample::select(names), 0usize..3, 0usize..3, any::<bool>()).prop_map(
        |((code, name), lead, trail, upper)| {
            let body = if upper { name.to_uppercase() } else { name.to_lowercase() };
            let body = body.replace(' ', "  ");
            let messy = format!("{}{}{}", " ".repeat(lead), body, " ".repeat(trail));
            (code, messy)
        },
    )
}
