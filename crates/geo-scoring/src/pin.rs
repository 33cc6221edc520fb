//! Pin-the-country rounds
//!
//! A target is drawn from the playable pool, the player drops one pin, and
//! the pin is scored by its great-circle distance to the target centroid.

use crate::{
    great_circle_distance_km, nearest_country, score_from_distance_km, Result, ScoringError,
};
use country_data::{Country, GeoPoint};
use rand::Rng;
use tracing::debug;

/// Outcome of a single pin drop
#[derive(Debug, Clone, PartialEq)]
pub struct PinOutcome<'a> {
    pub guess: GeoPoint,
    pub distance_km: f64,
    pub score: u32,
    /// Country whose centroid is closest to the pin
    pub nearest: Option<&'a Country>,
    /// Nearest centroid is the target itself
    pub hit: bool,
}

/// Multi-round pin session over a fixed pool
#[derive(Debug, Clone)]
pub struct PinSession<'a> {
    pool: Vec<&'a Country>,
    target: &'a Country,
    outcome: Option<PinOutcome<'a>>,
    round: u32,
    total_score: u64,
    hits: u32,
}

impl<'a> PinSession<'a> {
    /// Start round 1. An empty pool cannot be played.
    pub fn new<R: Rng + ?Sized>(pool: Vec<&'a Country>, rng: &mut R) -> Result<Self> {
        let target = draw(&pool, rng)?;
        debug!("Pin round 1 target: {}", target.code);
        Ok(Self {
            pool,
            target,
            outcome: None,
            round: 1,
            total_score: 0,
            hits: 0,
        })
    }

    /// Drop the pin for the current round
    pub fn guess(&mut self, point: GeoPoint) -> Result<&PinOutcome<'a>> {
        if self.outcome.is_some() {
            return Err(ScoringError::AlreadyGuessed);
        }

        let distance_km = great_circle_distance_km(point, self.target.centroid);
        let score = score_from_distance_km(distance_km);
        let nearest = nearest_country(point, self.pool.iter().copied()).map(|m| m.country);
        let hit = nearest.is_some_and(|c| c.code == self.target.code);

        self.total_score += u64::from(score);
        if hit {
            self.hits += 1;
        }
        debug!(
            "Pin at ({:.2}, {:.2}): {:.0} km from {}, score {}",
            point.lat, point.lon, distance_km, self.target.code, score
        );

        Ok(&*self.outcome.insert(PinOutcome {
            guess: point,
            distance_km,
            score,
            nearest,
            hit,
        }))
    }

    /// Draw a new target and clear the pin. Totals carry over.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&'a Country> {
        self.target = draw(&self.pool, rng)?;
        self.outcome = None;
        self.round += 1;
        debug!("Pin round {} target: {}", self.round, self.target.code);
        Ok(self.target)
    }

    pub fn target(&self) -> &'a Country {
        self.target
    }

    pub fn outcome(&self) -> Option<&PinOutcome<'a>> {
        self.outcome.as_ref()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Rounds that have received a pin
    pub fn rounds_played(&self) -> u32 {
        if self.outcome.is_some() {
            self.round
        } else {
            self.round - 1
        }
    }
}

fn draw<'a, R: Rng + ?Sized>(pool: &[&'a Country], rng: &mut R) -> Result<&'a Country> {
    if pool.is_empty() {
        return Err(ScoringError::InsufficientData);
    }
    Ok(pool[rng.random_range(0..pool.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::{Continent, ContinentFilter, CountryTable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_pool_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = PinSession::new(Vec::new(), &mut rng).unwrap_err();
        assert_eq!(err, ScoringError::InsufficientData);
    }

    #[test]
    fn test_pin_on_target_scores_max() {
        let table = CountryTable::with_defaults();
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = PinSession::new(table.filter(ContinentFilter::All), &mut rng).unwrap();

        let target = session.target();
        let outcome = session.guess(target.centroid).unwrap().clone();
        assert_eq!(outcome.score, 5000);
        assert!(outcome.hit);
        assert_eq!(outcome.nearest.unwrap().code, target.code);
        assert_eq!(session.total_score(), 5000);
        assert_eq!(session.hits(), 1);
        assert_eq!(session.rounds_played(), 1);
    }

    #[test]
    fn test_second_guess_rejected() {
        let table = CountryTable::with_defaults();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = PinSession::new(table.filter(ContinentFilter::All), &mut rng).unwrap();

        session.guess(GeoPoint::new(0.0, 0.0)).unwrap();
        let before = session.total_score();
        assert_eq!(
            session.guess(GeoPoint::new(10.0, 10.0)).unwrap_err(),
            ScoringError::AlreadyGuessed
        );
        assert_eq!(session.total_score(), before);
    }

    #[test]
    fn test_miss_far_away() {
        let table = CountryTable::with_defaults();
        let oceania = table.filter(ContinentFilter::Only(Continent::Oceania));
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = PinSession::new(oceania, &mut rng).unwrap();
        assert_eq!(session.target().code, "au");

        // Pin in the North Atlantic, still nearest to the only candidate
        let outcome = session.guess(GeoPoint::new(45.0, -30.0)).unwrap();
        assert!(outcome.distance_km > 15_000.0);
        assert!(outcome.score < 10);
        assert!(outcome.hit);
    }

    #[test]
    fn test_next_round_resets_pin_keeps_totals() {
        let table = CountryTable::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = PinSession::new(table.filter(ContinentFilter::All), &mut rng).unwrap();

        let first = session.target().centroid;
        session.guess(first).unwrap();
        session.next_round(&mut rng).unwrap();

        assert_eq!(session.round(), 2);
        assert!(session.outcome().is_none());
        assert_eq!(session.total_score(), 5000);
        assert_eq!(session.rounds_played(), 1);
        assert!(session.guess(GeoPoint::new(0.0, 0.0)).is_ok());
    }
}
