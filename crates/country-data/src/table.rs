//! Country and border lookup tables

use crate::{is_valid_code, normalize_answer, ContinentFilter, Country, DataError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Ordered country records with a case-insensitive code index
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    countries: Vec<Country>,
    index: HashMap<String, usize>,
}

impl CountryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table populated with the built-in dataset
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        crate::builtin::load_default_countries(&mut table);
        table
    }

    /// Add a record. Codes must be two letters and unique.
    pub fn insert(&mut self, mut country: Country) -> Result<()> {
        if !is_valid_code(&country.code) {
            return Err(DataError::InvalidCode(country.code));
        }
        country.code = country.code.to_lowercase();
        if self.index.contains_key(&country.code) {
            return Err(DataError::DuplicateCode(country.code));
        }
        self.index.insert(country.code.clone(), self.countries.len());
        self.countries.push(country);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Country> {
        self.index
            .get(&code.to_lowercase())
            .map(|&i| &self.countries[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(&code.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Countries matching a continent filter, in table order
    pub fn filter(&self, filter: ContinentFilter) -> Vec<&Country> {
        self.countries.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Countries with a positive population figure
    pub fn with_population(&self) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|c| c.population.is_some_and(|p| p > 0.0))
            .collect()
    }

    /// Countries with a positive area figure
    pub fn with_area(&self) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|c| c.area.is_some_and(|a| a > 0.0))
            .collect()
    }

    /// Resolve free text against every country in the table
    pub fn find_by_name(&self, text: &str) -> Option<&Country> {
        resolve_by_name(self.countries.iter(), text)
    }
}

/// Resolve free text to a country by name.
///
/// Exact normalized match wins; otherwise the first candidate whose
/// lowercased name starts with the text. Blank text never resolves.
pub fn resolve_by_name<'a, I>(candidates: I, text: &str) -> Option<&'a Country>
where
    I: IntoIterator<Item = &'a Country>,
{
    let wanted = normalize_answer(text);
    if wanted.is_empty() {
        return None;
    }
    let candidates: Vec<&'a Country> = candidates.into_iter().collect();
    candidates
        .iter()
        .find(|c| normalize_answer(&c.name) == wanted)
        .or_else(|| {
            candidates
                .iter()
                .find(|c| c.name.to_lowercase().starts_with(&wanted))
        })
        .copied()
}

/// Land-border adjacency as curated: code -> neighbour codes.
///
/// Entries are stored exactly as listed and may be one-sided.
#[derive(Debug, Clone, Default)]
pub struct BorderTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl BorderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        crate::builtin::load_default_borders(&mut table);
        table
    }

    pub fn insert<S: AsRef<str>>(&mut self, code: &str, neighbours: &[S]) {
        let list = neighbours
            .iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        self.entries.insert(code.to_lowercase(), list);
    }

    /// Neighbour codes listed under `code` (empty if unknown)
    pub fn neighbours(&self, code: &str) -> &[String] {
        self.entries
            .get(&code.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Directed check: does `a` list `b`?
    pub fn are_neighbours(&self, a: &str, b: &str) -> bool {
        let b = b.to_lowercase();
        self.neighbours(a).iter().any(|n| *n == b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Every code that appears as a key or a neighbour
    pub fn codes(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|(k, v)| std::iter::once(k).chain(v.iter()))
            .cloned()
            .collect()
    }

    /// Pairs (a, b) where a lists b, b has its own entry, and b does not list a
    pub fn asymmetric_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (a, list) in &self.entries {
            for b in list {
                if self.entries.contains_key(b) && !self.are_neighbours(b, a) {
                    pairs.push((a.clone(), b.clone()));
                }
            }
        }
        if !pairs.is_empty() {
            debug!("Border table has {} one-sided entries", pairs.len());
        }
        pairs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Continent, GeoPoint};

    fn country(code: &str, name: &str) -> Country {
        Country::new(code, name, "Cap", GeoPoint::new(0.0, 0.0), Continent::Europe, name)
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = CountryTable::new();
        table.insert(country("fr", "France")).unwrap();
        let err = table.insert(country("FR", "France again")).unwrap_err();
        assert!(matches!(err, DataError::DuplicateCode(code) if code == "fr"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_rejects_bad_code() {
        let mut table = CountryTable::new();
        assert!(matches!(
            table.insert(country("fra", "France")),
            Err(DataError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let table = CountryTable::with_defaults();
        assert_eq!(table.get("DE").unwrap().name, "Germany");
        assert_eq!(table.get("de").unwrap().name, "Germany");
        assert!(table.get("zz").is_none());
    }

    #[test]
    fn test_defaults_have_unique_codes() {
        let table = CountryTable::with_defaults();
        assert_eq!(table.len(), 72);
        let codes: BTreeSet<_> = table.iter().map(|c| c.code.clone()).collect();
        assert_eq!(codes.len(), table.len());
        assert!(table.iter().all(|c| c.centroid.is_valid()));
    }

    #[test]
    fn test_filter_by_continent() {
        let table = CountryTable::with_defaults();
        let oceania = table.filter(ContinentFilter::Only(Continent::Oceania));
        assert_eq!(oceania.len(), 1);
        assert_eq!(oceania[0].code, "au");
        assert_eq!(table.filter(ContinentFilter::All).len(), table.len());
    }

    #[test]
    fn test_with_population() {
        let table = CountryTable::with_defaults();
        let pop = table.with_population();
        assert!(pop.len() >= 2);
        assert!(pop.iter().all(|c| c.population.unwrap() > 0.0));
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let table = CountryTable::with_defaults();
        assert_eq!(resolve_by_name(table.iter(), "india").unwrap().code, "in");
        assert_eq!(resolve_by_name(table.iter(), "indo").unwrap().code, "id");
        assert_eq!(resolve_by_name(table.iter(), "  united   KINGDOM ").unwrap().code, "gb");
        assert!(resolve_by_name(table.iter(), "").is_none());
        assert!(resolve_by_name(table.iter(), "atlantis").is_none());
    }

    #[test]
    fn test_border_lookup() {
        let borders = BorderTable::with_defaults();
        assert!(borders.are_neighbours("fr", "de"));
        assert!(borders.are_neighbours("DE", "FR"));
        assert!(!borders.are_neighbours("de", "ru"));
        assert!(borders.neighbours("xx").is_empty());
        assert!(borders.neighbours("au").is_empty());
    }

    #[test]
    fn test_asymmetric_pairs_reported() {
        let mut borders = BorderTable::new();
        borders.insert("aa", &["bb"]);
        borders.insert("bb", &[] as &[&str]);
        borders.insert("cc", &["zz"]);
        assert_eq!(borders.asymmetric_pairs(), vec![("aa".to_string(), "bb".to_string())]);
        assert!(borders.codes().contains("zz"));
    }
}
