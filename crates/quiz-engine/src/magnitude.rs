//! "Which is bigger?" comparison rounds

use crate::options::sample;
use crate::{QuizError, Result};
use country_data::Country;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Quantity being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Population,
    Area,
}

impl Metric {
    /// Positive figure for `country`, if known
    pub fn value(&self, country: &Country) -> Option<f64> {
        let v = match self {
            Metric::Population => country.population,
            Metric::Area => country.area,
        };
        v.filter(|v| *v > 0.0)
    }

    pub fn describe(&self, country: &Country) -> String {
        match (self, self.value(country)) {
            (Metric::Population, Some(v)) => format!("{:.0} million people", v),
            (Metric::Area, Some(v)) => format!("{:.0} km²", v),
            (_, None) => "unknown".to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Population => f.write_str("population"),
            Metric::Area => f.write_str("area"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "population" | "pop" => Ok(Metric::Population),
            "area" => Ok(Metric::Area),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Two distinct countries; the player picks the larger one
#[derive(Debug, Clone)]
pub struct MagnitudeRound<'a> {
    metric: Metric,
    left: &'a Country,
    right: &'a Country,
    picked: Option<Side>,
}

impl<'a> MagnitudeRound<'a> {
    /// Draw two distinct countries that have the metric
    pub fn new<R: Rng + ?Sized>(pool: &[&'a Country], metric: Metric, rng: &mut R) -> Result<Self> {
        let candidates: Vec<&'a Country> = pool
            .iter()
            .copied()
            .filter(|c| metric.value(c).is_some())
            .collect();
        match sample(&candidates, 2, rng)[..] {
            [left, right] => Ok(Self::between(left, right, metric)),
            _ => Err(QuizError::InsufficientData),
        }
    }

    pub fn between(left: &'a Country, right: &'a Country, metric: Metric) -> Self {
        Self {
            metric,
            left,
            right,
            picked: None,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn left(&self) -> &'a Country {
        self.left
    }

    pub fn right(&self) -> &'a Country {
        self.right
    }

    /// Side with the larger figure; the left side wins ties
    pub fn larger(&self) -> Side {
        let left = self.metric.value(self.left).unwrap_or(0.0);
        let right = self.metric.value(self.right).unwrap_or(0.0);
        if left >= right {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn answer(&mut self, side: Side) -> Result<bool> {
        if self.picked.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        self.picked = Some(side);
        Ok(side == self.larger())
    }

    pub fn picked(&self) -> Option<Side> {
        self.picked
    }
}
