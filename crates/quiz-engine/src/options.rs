//! Multiple-choice option generation

use crate::{QuizError, Result};
use country_data::{Country, CountryTable};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Options shown per question (one correct, the rest decoys)
pub const OPTION_COUNT: usize = 4;

/// Country field a question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Capital,
    NativeName,
    Name,
}

impl Attribute {
    pub fn of<'c>(&self, country: &'c Country) -> &'c str {
        match self {
            Attribute::Capital => &country.capital,
            Attribute::NativeName => &country.native_name,
            Attribute::Name => &country.name,
        }
    }
}

/// Uniform in-place shuffle (Fisher–Yates)
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Up to `n` distinct elements in random order
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out.truncate(n);
    out
}

/// Correct value plus three distinct decoys, shuffled.
///
/// Decoys come from the rest of `pool` in random order. When the pool cannot
/// supply three distinct values, countries from `table` outside the pool
/// fill the gap.
pub fn build_options<R: Rng + ?Sized>(
    target: &Country,
    pool: &[&Country],
    table: &CountryTable,
    attribute: Attribute,
    rng: &mut R,
) -> Result<Vec<String>> {
    let correct = attribute.of(target);
    if correct.trim().is_empty() {
        return Err(QuizError::InsufficientData);
    }

    let wanted = OPTION_COUNT - 1;
    let mut seen: HashSet<&str> = HashSet::from([correct]);
    let mut decoys: Vec<&str> = Vec::with_capacity(wanted);

    let mut others: Vec<&Country> =
        pool.iter().copied().filter(|c| c.code != target.code).collect();
    others.shuffle(rng);
    take_decoys(&others, attribute, &mut seen, &mut decoys, wanted);

    if decoys.len() < wanted {
        let in_pool: HashSet<&str> = pool.iter().map(|c| c.code.as_str()).collect();
        let mut outside: Vec<&Country> = table
            .iter()
            .filter(|c| c.code != target.code && !in_pool.contains(c.code.as_str()))
            .collect();
        outside.shuffle(rng);
        debug!(
            "Topping up {} decoys for {} from {} countries outside the pool",
            wanted - decoys.len(),
            target.code,
            outside.len()
        );
        take_decoys(&outside, attribute, &mut seen, &mut decoys, wanted);
    }

    if decoys.len() < wanted {
        return Err(QuizError::InsufficientData);
    }

    let mut options: Vec<String> = std::iter::once(correct)
        .chain(decoys)
        .map(str::to_string)
        .collect();
    options.shuffle(rng);
    Ok(options)
}

fn take_decoys<'c>(
    candidates: &[&'c Country],
    attribute: Attribute,
    seen: &mut HashSet<&'c str>,
    decoys: &mut Vec<&'c str>,
    wanted: usize,
) {
    for country in candidates {
        if decoys.len() >= wanted {
            break;
        }
        let value = attribute.of(country);
        if !value.trim().is_empty() && seen.insert(value) {
            decoys.push(value);
        }
    }
}
