//! Typed-answer matching

use country_data::{normalize_answer, Country};

/// Normalised equality with the primary native name or any alternate
pub fn is_native_name_match(country: &Country, answer: &str) -> bool {
    let answer = normalize_answer(answer);
    if answer.is_empty() {
        return false;
    }
    std::iter::once(&country.native_name)
        .chain(country.native_name_alt.iter())
        .any(|name| normalize_answer(name) == answer)
}

/// Normalised equality, or either string a prefix of the other.
///
/// "Washington" matches "Washington D.C." and "Kyiv city" matches "Kyiv".
/// Blank never matches.
pub fn is_capital_match(country: &Country, answer: &str) -> bool {
    let answer = normalize_answer(answer);
    if answer.is_empty() {
        return false;
    }
    let capital = normalize_answer(&country.capital);
    if capital.is_empty() {
        return false;
    }
    capital == answer || capital.starts_with(&answer) || answer.starts_with(&capital)
}
