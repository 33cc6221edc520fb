//! Built-in dataset
//!
//! 72 countries with centroid, capital and native names, plus a curated
//! subset of land borders. Border lists may name countries that have no
//! record here (e.g. "tm"); consumers drop those.

use crate::{BorderTable, Continent, Country, CountryTable, GeoPoint};
use tracing::warn;

/// (code, name, capital, lat, lon, continent, native name, native alternates,
/// population in millions, area in km²)
type CountryRow = (
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    Continent,
    &'static str,
    &'static [&'static str],
    Option<f64>,
    Option<f64>,
);

#[rustfmt::skip]
const COUNTRIES: &[CountryRow] = &[
    ("af", "Afghanistan", "Kabul", 33.9391, 67.71, Continent::Asia, "Afghanistan", &[], None, None),
    ("al", "Albania", "Tirana", 41.1533, 20.1683, Continent::Europe, "Shqipëria", &[], None, None),
    ("dz", "Algeria", "Algiers", 28.0339, 1.6596, Continent::Africa, "Al Jaza'ir", &[], None, None),
    ("ar", "Argentina", "Buenos Aires", -38.4161, -63.6167, Continent::SouthAmerica, "Argentina", &[], None, None),
    ("au", "Australia", "Canberra", -25.2744, 133.7751, Continent::Oceania, "Australia", &[], Some(26.0), Some(7_692_000.0)),
    ("at", "Austria", "Vienna", 47.5162, 14.5501, Continent::Europe, "Österreich", &[], None, None),
    ("bd", "Bangladesh", "Dhaka", 23.685, 90.3563, Continent::Asia, "Bangladesh", &[], Some(170.0), Some(148_000.0)),
    ("be", "Belgium", "Brussels", 50.5039, 4.4699, Continent::Europe, "België", &["Belgique"], None, None),
    ("bo", "Bolivia", "Sucre", -16.2902, -63.5887, Continent::SouthAmerica, "Bolivia", &[], None, None),
    ("br", "Brazil", "Brasília", -14.235, -51.9253, Continent::SouthAmerica, "Brasil", &[], Some(215.0), Some(8_516_000.0)),
    ("bg", "Bulgaria", "Sofia", 42.7339, 25.4858, Continent::Europe, "Bălgarija", &[], None, None),
    ("kh", "Cambodia", "Phnom Penh", 12.5657, 104.991, Continent::Asia, "Kampuchea", &["Kâmpŭchéa"], None, None),
    ("cm", "Cameroon", "Yaoundé", 6.3703, 12.3547, Continent::Africa, "Cameroun", &[], None, None),
    ("ca", "Canada", "Ottawa", 56.1304, -106.3468, Continent::NorthAmerica, "Canada", &[], Some(39.0), Some(9_984_000.0)),
    ("cl", "Chile", "Santiago", -35.6751, -71.543, Continent::SouthAmerica, "Chile", &[], None, None),
    ("cn", "China", "Beijing", 35.8617, 104.1954, Continent::Asia, "Zhongguo", &["中国"], Some(1410.0), Some(9_597_000.0)),
    ("co", "Colombia", "Bogotá", 4.5709, -74.2973, Continent::SouthAmerica, "Colombia", &[], None, None),
    ("hr", "Croatia", "Zagreb", 45.1, 15.2, Continent::Europe, "Hrvatska", &[], None, None),
    ("cz", "Czech Republic", "Prague", 49.8175, 15.473, Continent::Europe, "Česko", &[], None, None),
    ("dk", "Denmark", "Copenhagen", 56.2639, 9.5018, Continent::Europe, "Danmark", &[], None, None),
    ("eg", "Egypt", "Cairo", 26.8206, 30.8025, Continent::Africa, "Misr", &["Masr"], Some(109.0), Some(1_002_000.0)),
    ("et", "Ethiopia", "Addis Ababa", 9.145, 40.4897, Continent::Africa, "Ityop'iya", &[], None, None),
    ("fi", "Finland", "Helsinki", 61.9241, 25.7482, Continent::Europe, "Suomi", &[], None, None),
    ("fr", "France", "Paris", 46.2276, 2.2137, Continent::Europe, "France", &[], Some(68.0), Some(643_000.0)),
    ("de", "Germany", "Berlin", 51.1657, 10.4515, Continent::Europe, "Deutschland", &[], Some(84.0), Some(357_000.0)),
    ("gr", "Greece", "Athens", 39.0742, 21.8243, Continent::Europe, "Ellada", &["Hellas", "Ellás"], None, None),
    ("hu", "Hungary", "Budapest", 47.1625, 19.5033, Continent::Europe, "Magyarország", &[], None, None),
    ("in", "India", "New Delhi", 20.5937, 78.9629, Continent::Asia, "Bharat", &["India"], Some(1420.0), Some(3_287_000.0)),
    ("id", "Indonesia", "Jakarta", -0.7893, 113.9213, Continent::Asia, "Indonesia", &[], Some(275.0), Some(1_910_000.0)),
    ("ir", "Iran", "Tehran", 32.4279, 53.688, Continent::Asia, "Iran", &[], None, None),
    ("iq", "Iraq", "Baghdad", 33.2232, 43.6793, Continent::Asia, "Al Iraq", &[], None, None),
    ("ie", "Ireland", "Dublin", 53.1424, -7.6921, Continent::Europe, "Éire", &[], None, None),
    ("il", "Israel", "Jerusalem", 31.0461, 34.8516, Continent::Asia, "Yisra'el", &["Israel"], None, None),
    ("it", "Italy", "Rome", 41.8719, 12.5674, Continent::Europe, "Italia", &[], Some(59.0), Some(301_000.0)),
    ("jp", "Japan", "Tokyo", 36.2048, 138.2529, Continent::Asia, "Nihon", &["Nippon"], Some(125.0), Some(378_000.0)),
    ("jo", "Jordan", "Amman", 30.5852, 36.2384, Continent::Asia, "Al Urdunn", &[], None, None),
    ("ke", "Kenya", "Nairobi", -0.0236, 37.9062, Continent::Africa, "Kenya", &[], None, None),
    ("la", "Laos", "Vientiane", 19.8563, 102.4955, Continent::Asia, "Lao", &["Muang Lao"], None, None),
    ("my", "Malaysia", "Kuala Lumpur", 4.2105, 101.9758, Continent::Asia, "Malaysia", &[], None, None),
    ("mx", "Mexico", "Mexico City", 23.6345, -102.5528, Continent::NorthAmerica, "México", &[], Some(128.0), Some(1_964_000.0)),
    ("ma", "Morocco", "Rabat", 31.7917, -7.0926, Continent::Africa, "Al Maghrib", &[], None, None),
    ("mm", "Myanmar", "Naypyidaw", 21.9162, 95.956, Continent::Asia, "Myanma", &["Bama"], None, None),
    ("np", "Nepal", "Kathmandu", 28.3949, 84.124, Continent::Asia, "Nepal", &[], None, None),
    ("nl", "Netherlands", "Amsterdam", 52.1326, 5.2913, Continent::Europe, "Nederland", &[], None, None),
    ("ng", "Nigeria", "Abuja", 9.082, 8.6753, Continent::Africa, "Nigeria", &[], Some(223.0), Some(924_000.0)),
    ("kp", "North Korea", "Pyongyang", 40.3399, 127.5101, Continent::Asia, "Choson", &["Joseon"], None, None),
    ("no", "Norway", "Oslo", 60.472, 8.4689, Continent::Europe, "Norge", &[], None, None),
    ("pk", "Pakistan", "Islamabad", 30.3753, 69.3451, Continent::Asia, "Pakistan", &[], Some(231.0), Some(881_000.0)),
    ("pe", "Peru", "Lima", -9.19, -75.0152, Continent::SouthAmerica, "Perú", &[], None, None),
    ("ph", "Philippines", "Manila", 12.8797, 121.774, Continent::Asia, "Pilipinas", &[], None, None),
    ("pl", "Poland", "Warsaw", 51.9194, 19.1451, Continent::Europe, "Polska", &[], None, None),
    ("pt", "Portugal", "Lisbon", 39.3999, -8.2245, Continent::Europe, "Portugal", &[], None, None),
    ("ro", "Romania", "Bucharest", 45.9432, 24.9668, Continent::Europe, "România", &[], None, None),
    ("ru", "Russia", "Moscow", 61.524, 105.3188, Continent::Europe, "Rossiya", &[], Some(144.0), Some(17_098_000.0)),
    ("sa", "Saudi Arabia", "Riyadh", 23.8859, 45.0792, Continent::Asia, "Al Arabiyah as Sa'udiyah", &[], None, None),
    ("za", "South Africa", "Pretoria", -30.5595, 22.9375, Continent::Africa, "South Africa", &[], None, None),
    ("kr", "South Korea", "Seoul", 35.9078, 127.7669, Continent::Asia, "Hanguk", &["Joseon"], None, None),
    ("es", "Spain", "Madrid", 40.4637, -3.7492, Continent::Europe, "España", &[], Some(48.0), Some(506_000.0)),
    ("sd", "Sudan", "Khartoum", 12.8628, 30.2176, Continent::Africa, "As Sudan", &[], None, None),
    ("se", "Sweden", "Stockholm", 60.1282, 18.6435, Continent::Europe, "Sverige", &[], None, None),
    ("ch", "Switzerland", "Bern", 46.8182, 8.2275, Continent::Europe, "Schweiz", &["Suisse", "Svizzera"], None, None),
    ("sy", "Syria", "Damascus", 34.8021, 38.9968, Continent::Asia, "Suriyah", &[], None, None),
    ("th", "Thailand", "Bangkok", 15.87, 100.9925, Continent::Asia, "Prathet Thai", &["Muang Thai"], None, None),
    ("tn", "Tunisia", "Tunis", 33.8869, 9.5375, Continent::Africa, "Tunis", &[], None, None),
    ("tr", "Turkey", "Ankara", 38.9637, 35.2433, Continent::Asia, "Türkiye", &[], None, None),
    ("ua", "Ukraine", "Kyiv", 48.3794, 31.1656, Continent::Europe, "Ukraina", &[], None, None),
    ("gb", "United Kingdom", "London", 55.3781, -3.436, Continent::Europe, "United Kingdom", &[], Some(67.0), Some(243_000.0)),
    ("us", "United States", "Washington D.C.", 37.0902, -95.7129, Continent::NorthAmerica, "United States", &[], Some(335.0), Some(9_834_000.0)),
    ("uy", "Uruguay", "Montevideo", -32.5228, -55.7658, Continent::SouthAmerica, "Uruguay", &[], None, None),
    ("ve", "Venezuela", "Caracas", 6.4238, -66.5897, Continent::SouthAmerica, "Venezuela", &[], None, None),
    ("vn", "Vietnam", "Hanoi", 14.0583, 108.2772, Continent::Asia, "Việt Nam", &["Viet Nam"], None, None),
    ("zw", "Zimbabwe", "Harare", -19.0154, 29.1549, Continent::Africa, "Zimbabwe", &[], None, None),
];

#[rustfmt::skip]
const BORDERS: &[(&str, &[&str])] = &[
    ("af", &["ir", "pk", "tm", "uz", "tj", "cn"]),
    ("al", &["me", "mk", "gr", "rs"]),
    ("dz", &["ly", "ne", "mr", "ml", "tn", "eh", "ma"]),
    ("ar", &["bo", "br", "cl", "py", "uy"]),
    ("at", &["ch", "de", "hu", "it", "li", "sk", "si", "cz"]),
    ("au", &[]),
    ("bd", &["in", "mm"]),
    ("be", &["fr", "de", "lu", "nl"]),
    ("bo", &["ar", "br", "cl", "py", "pe"]),
    ("br", &["ar", "bo", "co", "gy", "py", "pe", "sr", "uy", "ve"]),
    ("bg", &["gr", "mk", "ro", "rs", "tr"]),
    ("kh", &["la", "th", "vn"]),
    ("cm", &["cf", "cg", "ga", "gq", "ng", "td"]),
    ("ca", &["us"]),
    ("cl", &["ar", "bo", "pe"]),
    ("cn", &["af", "bt", "mm", "in", "kz", "kp", "kg", "la", "mn", "np", "pk", "ru", "tj", "vn"]),
    ("co", &["br", "ec", "pa", "pe", "ve"]),
    ("hr", &["ba", "hu", "me", "rs", "si"]),
    ("cz", &["at", "de", "pl", "sk"]),
    ("dk", &["de"]),
    ("eg", &["il", "ly", "ps", "sd"]),
    ("et", &["dj", "er", "ke", "so", "ss", "sd"]),
    ("fi", &["no", "ru", "se"]),
    ("fr", &["be", "lu", "de", "ch", "it", "es", "ad", "mc", "gb"]),
    ("de", &["at", "be", "ch", "cz", "dk", "fr", "lu", "nl", "pl"]),
    ("gr", &["al", "bg", "tr", "mk"]),
    ("hu", &["at", "hr", "ro", "rs", "si", "sk", "ua"]),
    ("in", &["bd", "bt", "mm", "cn", "np", "pk", "lk"]),
    ("id", &["my", "pg", "tl"]),
    ("ir", &["af", "am", "az", "iq", "pk", "tr", "tm"]),
    ("iq", &["ir", "jo", "kw", "sa", "sy", "tr"]),
    ("ie", &["gb"]),
    ("il", &["eg", "jo", "lb", "ps", "sy"]),
    ("it", &["at", "fr", "sm", "si", "ch", "va"]),
    ("jp", &[]),
    ("jo", &["iq", "il", "ps", "sa", "sy"]),
    ("ke", &["et", "so", "ss", "tz", "ug"]),
    ("la", &["kh", "cn", "mm", "th", "vn"]),
    ("my", &["bn", "id", "th"]),
    ("mx", &["bz", "gt", "us"]),
    ("ma", &["dz", "eh", "es"]),
    ("mm", &["bd", "cn", "in", "la", "th"]),
    ("np", &["cn", "in"]),
    ("nl", &["be", "de"]),
    ("ng", &["bj", "cm", "td", "ne"]),
    ("kp", &["cn", "kr", "ru"]),
    ("no", &["fi", "ru", "se"]),
    ("pk", &["af", "cn", "in", "ir"]),
    ("pe", &["bo", "br", "cl", "co", "ec"]),
    ("ph", &[]),
    ("pl", &["by", "cz", "de", "lt", "ru", "sk", "ua"]),
    ("pt", &["es"]),
    ("ro", &["bg", "hu", "md", "rs", "ua"]),
    ("ru", &["az", "by", "cn", "ee", "fi", "ge", "kp", "kz", "lv", "lt", "mn", "no", "pl", "ua", "uz"]),
    ("sa", &["iq", "jo", "kw", "om", "qa", "ae", "ye"]),
    ("za", &["bw", "ls", "mz", "na", "sz", "zw"]),
    ("kr", &["kp"]),
    ("es", &["ad", "fr", "ma", "pt"]),
    ("sd", &["cf", "td", "eg", "er", "et", "ly", "ss"]),
    ("se", &["fi", "no"]),
    ("ch", &["at", "de", "fr", "it", "li"]),
    ("sy", &["iq", "il", "jo", "lb", "tr"]),
    ("th", &["kh", "la", "mm", "my"]),
    ("tn", &["dz", "ly"]),
    ("tr", &["am", "az", "bg", "ge", "gr", "ir", "iq", "sy"]),
    ("ua", &["by", "hu", "md", "pl", "ro", "ru", "sk"]),
    ("gb", &["ie"]),
    ("us", &["ca", "mx"]),
    ("uy", &["ar", "br"]),
    ("ve", &["br", "co", "gy"]),
    ("vn", &["kh", "cn", "la"]),
    ("zw", &["bw", "mz", "za", "zm"]),
];

/// Populate a table with the built-in countries
pub fn load_default_countries(table: &mut CountryTable) {
    for &(code, name, capital, lat, lon, continent, native, alts, population, area) in COUNTRIES {
        let country = Country::new(code, name, capital, GeoPoint::new(lat, lon), continent, native)
            .with_native_alts(alts)
            .with_population(population)
            .with_area(area);
        if let Err(e) = table.insert(country) {
            warn!("Skipping built-in country {}: {}", code, e);
        }
    }
}

/// Populate a border table with the built-in adjacency lists
pub fn load_default_borders(table: &mut BorderTable) {
    for &(code, neighbours) in BORDERS {
        table.insert(code, neighbours);
    }
}
