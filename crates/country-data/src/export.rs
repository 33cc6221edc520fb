//! Export country centroids for map widgets

use crate::Country;

/// Export countries as a GeoJSON FeatureCollection of centroid points
pub fn to_geojson<'a, I>(countries: I) -> serde_json::Value
where
    I: IntoIterator<Item = &'a Country>,
{
    let features: Vec<serde_json::Value> = countries
        .into_iter()
        .map(|c| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [c.centroid.lon, c.centroid.lat]
                },
                "properties": {
                    "code": c.code,
                    "name": c.name,
                    "capital": c.capital,
                    "continent": c.continent.name(),
                    "population": c.population,
                    "area": c.area
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features
    })
}
