//! Multiple-choice rounds: capital, native name and flag

use crate::options::{build_options, Attribute};
use crate::{QuizError, Result};
use country_data::{normalize_answer, Country, CountryTable};
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    /// Name shown, pick the capital
    Capital,
    /// Name shown, pick what locals call it
    NativeName,
    /// Flag shown, pick the country
    Flag,
}

impl ChoiceKind {
    fn attribute(&self) -> Attribute {
        match self {
            ChoiceKind::Capital => Attribute::Capital,
            ChoiceKind::NativeName => Attribute::NativeName,
            ChoiceKind::Flag => Attribute::Name,
        }
    }
}

/// Feedback for a picked option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResult {
    pub correct: bool,
    pub picked: String,
    pub expected: String,
}

/// One question with four options, answerable once
#[derive(Debug, Clone)]
pub struct ChoiceRound<'a> {
    kind: ChoiceKind,
    target: &'a Country,
    options: Vec<String>,
    result: Option<ChoiceResult>,
}

impl<'a> ChoiceRound<'a> {
    pub fn capital<R: Rng + ?Sized>(
        pool: &[&'a Country],
        table: &'a CountryTable,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new(ChoiceKind::Capital, pool, table, rng)
    }

    pub fn native_name<R: Rng + ?Sized>(
        pool: &[&'a Country],
        table: &'a CountryTable,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new(ChoiceKind::NativeName, pool, table, rng)
    }

    pub fn flag<R: Rng + ?Sized>(
        pool: &[&'a Country],
        table: &'a CountryTable,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new(ChoiceKind::Flag, pool, table, rng)
    }

    /// Draw a target from `pool` and build its options
    pub fn new<R: Rng + ?Sized>(
        kind: ChoiceKind,
        pool: &[&'a Country],
        table: &'a CountryTable,
        rng: &mut R,
    ) -> Result<Self> {
        if pool.is_empty() {
            return Err(QuizError::InsufficientData);
        }
        let target = pool[rng.random_range(0..pool.len())];
        Self::for_target(kind, target, pool, table, rng)
    }

    pub fn for_target<R: Rng + ?Sized>(
        kind: ChoiceKind,
        target: &'a Country,
        pool: &[&'a Country],
        table: &'a CountryTable,
        rng: &mut R,
    ) -> Result<Self> {
        let options = build_options(target, pool, table, kind.attribute(), rng)?;
        debug!("{:?} question for {}: {:?}", kind, target.code, options);
        Ok(Self {
            kind,
            target,
            options,
            result: None,
        })
    }

    pub fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub fn target(&self) -> &'a Country {
        self.target
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> &str {
        self.kind.attribute().of(self.target)
    }

    pub fn question(&self) -> String {
        match self.kind {
            ChoiceKind::Capital => format!("What is the capital of {}?", self.target.name),
            ChoiceKind::NativeName => format!("What do locals call {}?", self.target.name),
            ChoiceKind::Flag => format!("Which country is this flag? {}", self.target.flag_url()),
        }
    }

    /// Pick an option by its text (case and spacing ignored)
    pub fn answer(&mut self, option: &str) -> Result<&ChoiceResult> {
        if self.result.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let wanted = normalize_answer(option);
        let picked = self
            .options
            .iter()
            .find(|o| normalize_answer(o) == wanted)
            .cloned()
            .ok_or_else(|| QuizError::UnknownOption(option.to_string()))?;

        let expected = self.correct_option().to_string();
        Ok(&*self.result.insert(ChoiceResult {
            correct: picked == expected,
            picked,
            expected,
        }))
    }

    /// Pick an option by its zero-based position
    pub fn answer_index(&mut self, index: usize) -> Result<&ChoiceResult> {
        let option = self
            .options
            .get(index)
            .cloned()
            .ok_or_else(|| QuizError::UnknownOption(index.to_string()))?;
        self.answer(&option)
    }

    pub fn result(&self) -> Option<&ChoiceResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::{Continent, ContinentFilter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_capital_round() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::Only(Continent::Europe));
        let fr = table.get("fr").unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let mut round =
            ChoiceRound::for_target(ChoiceKind::Capital, fr, &pool, &table, &mut rng).unwrap();
        assert_eq!(round.question(), "What is the capital of France?");
        assert_eq!(round.correct_option(), "Paris");

        let result = round.answer("  paris ").unwrap();
        assert!(result.correct);
        assert_eq!(result.picked, "Paris");
        assert_eq!(round.answer("Paris").unwrap_err(), QuizError::AlreadyAnswered);
    }

    #[test]
    fn test_wrong_option() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let de = table.get("de").unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let mut round =
            ChoiceRound::for_target(ChoiceKind::NativeName, de, &pool, &table, &mut rng).unwrap();
        let wrong = round
            .options()
            .iter()
            .position(|o| o != "Deutschland")
            .unwrap();
        let result = round.answer_index(wrong).unwrap();
        assert!(!result.correct);
        assert_eq!(result.expected, "Deutschland");
    }

    #[test]
    fn test_unknown_option_does_not_reveal() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(5);

        let mut round = ChoiceRound::capital(&pool, &table, &mut rng).unwrap();
        assert!(matches!(round.answer("Atlantis City"), Err(QuizError::UnknownOption(_))));
        assert!(matches!(round.answer_index(9), Err(QuizError::UnknownOption(_))));
        assert!(round.result().is_none());
    }

    #[test]
    fn test_flag_round() {
        let table = CountryTable::with_defaults();
        let pool = table.filter(ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(21);

        let mut round = ChoiceRound::flag(&pool, &table, &mut rng).unwrap();
        let target = round.target();
        assert!(round.question().ends_with(&format!("/w320/{}.png", target.code)));
        assert!(round.options().contains(&target.name));
        let name = target.name.clone();
        assert!(round.answer(&name).unwrap().correct);
    }

    #[test]
    fn test_empty_pool() {
        let table = CountryTable::with_defaults();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ChoiceRound::native_name(&[], &table, &mut rng).unwrap_err(),
            QuizError::InsufficientData
        );
    }
}
