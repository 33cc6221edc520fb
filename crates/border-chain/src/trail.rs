//! Country Trail rules and session

use crate::{BorderGraph, ChainError, Result};
use country_data::table::resolve_by_name;
use country_data::Country;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailState {
    InProgress,
    Won,
}

/// Visited codes, start first, plus the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainState {
    visited: Vec<String>,
    end: String,
}

impl ChainState {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            visited: vec![start.to_lowercase()],
            end: end.to_lowercase(),
        }
    }

    pub fn start(&self) -> &str {
        &self.visited[0]
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Most recently accepted code (the start before any hop)
    pub fn tail(&self) -> &str {
        self.visited.last().map(String::as_str).unwrap_or(&self.end)
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn contains(&self, code: &str) -> bool {
        self.visited.iter().any(|c| c == code)
    }

    /// Accepted hops so far
    pub fn steps(&self) -> usize {
        self.visited.len() - 1
    }

    pub fn state(&self) -> TrailState {
        if self.steps() > 0 && self.tail() == self.end {
            TrailState::Won
        } else {
            TrailState::InProgress
        }
    }
}

/// An accepted guess
#[derive(Debug, Clone, PartialEq)]
pub struct Hop<'a> {
    pub country: &'a Country,
    pub chain: ChainState,
    pub won: bool,
}

/// Check a typed guess against the current chain.
///
/// The guess is resolved by name against the eligible countries only. On
/// success the returned chain has the country appended; `chain` itself is
/// never modified.
pub fn validate_next_hop<'a>(
    chain: &ChainState,
    guess: &str,
    graph: &BorderGraph<'a>,
    eligible: &BTreeSet<String>,
) -> Result<Hop<'a>> {
    let candidates = graph.countries().filter(|c| eligible.contains(&c.code));
    let country = resolve_by_name(candidates, guess)
        .ok_or_else(|| ChainError::NotFound(guess.trim().to_string()))?;

    if chain.contains(&country.code) {
        return Err(ChainError::AlreadyVisited(country.name.clone()));
    }

    if !graph.are_adjacent(chain.tail(), &country.code) {
        let from = graph
            .country(chain.tail())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| chain.tail().to_string());
        return Err(ChainError::NotAdjacent {
            from,
            to: country.name.clone(),
        });
    }

    let mut next = chain.clone();
    next.visited.push(country.code.clone());
    let won = country.code == next.end;

    Ok(Hop {
        country,
        chain: next,
        won,
    })
}

/// Draw two distinct trail-eligible countries as (start, end)
pub fn pick_start_end_pair<'a, R: Rng + ?Sized>(
    graph: &BorderGraph<'a>,
    eligible: &BTreeSet<String>,
    rng: &mut R,
) -> Result<(&'a Country, &'a Country)> {
    let mut pool = graph.trail_eligible(eligible);
    if pool.len() < 2 {
        return Err(ChainError::InsufficientData);
    }
    pool.shuffle(rng);
    debug!("Trail pair {} -> {} from {} candidates", pool[0].code, pool[1].code, pool.len());
    Ok((pool[0], pool[1]))
}

/// Pair draws tried by [`Trail::random_winnable`]
pub const MAX_DRAWS: usize = 64;

/// One Country Trail game over a fixed graph and eligible set
#[derive(Debug, Clone)]
pub struct Trail<'a> {
    graph: &'a BorderGraph<'a>,
    eligible: BTreeSet<String>,
    chain: ChainState,
}

impl<'a> Trail<'a> {
    pub fn new(
        graph: &'a BorderGraph<'a>,
        eligible: BTreeSet<String>,
        start: &str,
        end: &str,
    ) -> Result<Self> {
        for code in [start, end] {
            if !graph.contains(code) {
                return Err(ChainError::UnknownCountry(code.to_string()));
            }
        }
        let chain = ChainState::new(start, end);
        if chain.start() == chain.end() {
            return Err(ChainError::SameEndpoints);
        }
        Ok(Self {
            graph,
            eligible,
            chain,
        })
    }

    /// Start a trail between a random eligible pair
    pub fn random<R: Rng + ?Sized>(
        graph: &'a BorderGraph<'a>,
        eligible: BTreeSet<String>,
        rng: &mut R,
    ) -> Result<Self> {
        let (start, end) = pick_start_end_pair(graph, &eligible, rng)?;
        Self::new(graph, eligible, &start.code, &end.code)
    }

    /// Like [`Trail::random`], but redraw until the end is reachable from
    /// the start. After `MAX_DRAWS` misses the last draw is kept.
    pub fn random_winnable<R: Rng + ?Sized>(
        graph: &'a BorderGraph<'a>,
        eligible: BTreeSet<String>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut trail = Self::random(graph, eligible.clone(), rng)?;
        for _ in 1..MAX_DRAWS {
            if trail.par().is_some() {
                return Ok(trail);
            }
            trail = Self::random(graph, eligible.clone(), rng)?;
        }
        if trail.par().is_none() {
            debug!("No connected pair after {} draws", MAX_DRAWS);
        }
        Ok(trail)
    }

    /// Submit a guess. Rejections leave the chain as it was.
    pub fn guess(&mut self, text: &str) -> Result<Hop<'a>> {
        if self.state() == TrailState::Won {
            return Err(ChainError::Finished);
        }
        let hop = validate_next_hop(&self.chain, text, self.graph, &self.eligible)?;
        self.chain = hop.chain.clone();
        if hop.won {
            debug!("Trail complete in {} steps", self.chain.steps());
        }
        Ok(hop)
    }

    pub fn state(&self) -> TrailState {
        self.chain.state()
    }

    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    /// Chain as country records, start first
    pub fn chain_countries(&self) -> Vec<&'a Country> {
        self.chain
            .visited()
            .iter()
            .filter_map(|code| self.graph.country(code))
            .collect()
    }

    pub fn steps(&self) -> usize {
        self.chain.steps()
    }

    pub fn start(&self) -> Option<&'a Country> {
        self.graph.country(self.chain.start())
    }

    pub fn end(&self) -> Option<&'a Country> {
        self.graph.country(self.chain.end())
    }

    /// Minimum hops possible from the start, for comparison after a win
    pub fn par(&self) -> Option<usize> {
        self.graph
            .shortest_trail(self.chain.start(), self.chain.end(), &self.eligible)
            .map(|path| path.len() - 1)
    }
}
