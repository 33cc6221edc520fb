//! "Map the City": place each capital on its country

use crate::options::{sample, shuffle};
use crate::{QuizError, Result};
use country_data::{normalize_answer, Country};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

pub const CITIES_PER_ROUND: usize = 4;

#[derive(Debug, Clone)]
pub struct CityMatchRound<'a> {
    countries: Vec<&'a Country>,
    /// Capitals in tray order
    capitals: Vec<String>,
    /// country code -> placed capital
    placements: BTreeMap<String, String>,
    checked: Option<usize>,
}

impl<'a> CityMatchRound<'a> {
    pub fn new<R: Rng + ?Sized>(pool: &[&'a Country], rng: &mut R) -> Result<Self> {
        if pool.len() < CITIES_PER_ROUND {
            return Err(QuizError::InsufficientData);
        }
        let countries = sample(pool, CITIES_PER_ROUND, rng);
        let mut capitals: Vec<String> = countries.iter().map(|c| c.capital.clone()).collect();
        shuffle(&mut capitals, rng);
        debug!(
            "Map round: {:?}",
            countries.iter().map(|c| c.code.as_str()).collect::<Vec<_>>()
        );
        Ok(Self {
            countries,
            capitals,
            placements: BTreeMap::new(),
            checked: None,
        })
    }

    /// Countries on the board
    pub fn countries(&self) -> &[&'a Country] {
        &self.countries
    }

    /// Capitals not yet placed, in tray order
    pub fn unplaced(&self) -> Vec<&str> {
        self.capitals
            .iter()
            .filter(|cap| !self.placements.values().any(|p| p == *cap))
            .map(String::as_str)
            .collect()
    }

    pub fn placement(&self, code: &str) -> Option<&str> {
        self.placements.get(&code.to_lowercase()).map(String::as_str)
    }

    pub fn all_placed(&self) -> bool {
        self.placements.len() == self.countries.len()
    }

    /// Put `capital` on `code`.
    ///
    /// A capital already sitting on another country moves here. Whatever was
    /// on `code` before goes back to the tray and is returned.
    pub fn place(&mut self, capital: &str, code: &str) -> Result<Option<String>> {
        if self.checked.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let code = code.to_lowercase();
        if !self.countries.iter().any(|c| c.code == code) {
            return Err(QuizError::UnknownCountry(code));
        }
        let wanted = normalize_answer(capital);
        let capital = self
            .capitals
            .iter()
            .find(|c| normalize_answer(c) == wanted)
            .cloned()
            .ok_or_else(|| QuizError::UnknownOption(capital.to_string()))?;

        self.placements.retain(|other, placed| *other == code || *placed != capital);
        Ok(self.placements.insert(code, capital))
    }

    /// Take the capital off `code` and return it to the tray
    pub fn remove(&mut self, code: &str) -> Result<Option<String>> {
        if self.checked.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        Ok(self.placements.remove(&code.to_lowercase()))
    }

    /// Count correct placements. Only allowed once every capital is placed,
    /// and only once per round.
    pub fn check(&mut self) -> Result<usize> {
        if self.checked.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        if !self.all_placed() {
            return Err(QuizError::NotAllPlaced);
        }
        let correct = self.countries.iter().filter(|c| self.is_correct(&c.code)).count();
        self.checked = Some(correct);
        Ok(correct)
    }

    pub fn is_correct(&self, code: &str) -> bool {
        match (self.countries.iter().find(|c| c.code == code), self.placements.get(code)) {
            (Some(country), Some(placed)) => country.capital == *placed,
            _ => false,
        }
    }

    pub fn checked(&self) -> Option<usize> {
        self.checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::{Continent, ContinentFilter, CountryTable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_board_has_four_countries_and_capitals() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::Only(Continent::Europe));
        let mut rng = StdRng::seed_from_u64(1);
        let game = CityMatchRound::new(&pool, &mut rng).unwrap();

        assert_eq!(game.countries().len(), CITIES_PER_ROUND);
        let mut tray: Vec<&str> = game.unplaced();
        let mut expected: Vec<&str> = game.countries().iter().map(|c| c.capital.as_str()).collect();
        tray.sort_unstable();
        expected.sort_unstable();
        assert_eq!(tray, expected);
    }

    #[test]
    fn test_small_pool_rejected() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::Only(Continent::NorthAmerica));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            CityMatchRound::new(&pool, &mut rng).unwrap_err(),
            QuizError::InsufficientData
        );
    }

    #[test]
    fn test_moving_and_displacing() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = CityMatchRound::new(&pool, &mut rng).unwrap();

        let a = game.countries()[0];
        let b = game.countries()[1];
        let first = game.unplaced()[0].to_string();
        let second = game.unplaced()[1].to_string();

        assert_eq!(game.place(&first, &a.code).unwrap(), None);
        assert_eq!(game.unplaced().len(), 3);

        // Same capital dragged to another country moves
        assert_eq!(game.place(&first, &b.code).unwrap(), None);
        assert_eq!(game.placement(&a.code), None);
        assert_eq!(game.placement(&b.code), Some(first.as_str()));

        // Dropping onto an occupied country sends the old capital back
        assert_eq!(game.place(&second, &b.code).unwrap(), Some(first.clone()));
        assert!(game.unplaced().contains(&first.as_str()));
        assert_eq!(game.unplaced().len(), 3);

        assert_eq!(game.remove(&b.code).unwrap(), Some(second));
        assert_eq!(game.unplaced().len(), 4);
    }

    #[test]
    fn test_check_requires_all_placed_and_counts_once() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = CityMatchRound::new(&pool, &mut rng).unwrap();

        assert_eq!(game.check().unwrap_err(), QuizError::NotAllPlaced);

        let board: Vec<(String, String)> = game
            .countries()
            .iter()
            .map(|c| (c.code.clone(), c.capital.clone()))
            .collect();
        for (code, capital) in &board {
            game.place(capital, code).unwrap();
        }
        assert!(game.all_placed());
        assert_eq!(game.check().unwrap(), CITIES_PER_ROUND);
        assert_eq!(game.check().unwrap_err(), QuizError::AlreadyAnswered);
        assert!(game.place(&board[0].1, &board[1].0).is_err());
    }

    #[test]
    fn test_rejects_unknown_inputs() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = CityMatchRound::new(&pool, &mut rng).unwrap();
        let code = game.countries()[0].code.clone();

        assert!(matches!(game.place("Atlantis", &code), Err(QuizError::UnknownOption(_))));
        let cap = game.unplaced()[0].to_string();
        assert!(matches!(game.place(&cap, "zz"), Err(QuizError::UnknownCountry(_))));
    }
}
