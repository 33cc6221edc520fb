//! Capital spelling: type the capital of the shown country

use crate::matching::is_capital_match;
use crate::{QuizError, Result};
use country_data::Country;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct SpellingRound<'a> {
    target: &'a Country,
    verdict: Option<bool>,
}

impl<'a> SpellingRound<'a> {
    pub fn new<R: Rng + ?Sized>(pool: &[&'a Country], rng: &mut R) -> Result<Self> {
        let playable: Vec<&'a Country> = pool
            .iter()
            .copied()
            .filter(|c| !c.capital.trim().is_empty())
            .collect();
        if playable.is_empty() {
            return Err(QuizError::InsufficientData);
        }
        Ok(Self::for_target(playable[rng.random_range(0..playable.len())]))
    }

    pub fn for_target(target: &'a Country) -> Self {
        Self { target, verdict: None }
    }

    pub fn target(&self) -> &'a Country {
        self.target
    }

    pub fn question(&self) -> String {
        format!("What is the capital of {}?", self.target.name)
    }

    /// Check a typed answer. A blank answer is ignored and the round stays
    /// open.
    pub fn answer(&mut self, text: &str) -> Result<bool> {
        if self.verdict.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        if text.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        let correct = is_capital_match(self.target, text);
        self.verdict = Some(correct);
        Ok(correct)
    }

    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }
}
