//! Interactive game loops
//!
//! Every loop plays up to `rounds` rounds and stops early on `q` or end of
//! input. An unanswered round is not counted. A filter that leaves too few
//! countries ends the game with a message and an empty session.

use crate::console::Console;
use anyhow::Result;
use border_chain::{BorderGraph, ChainError, Trail};
use country_data::{normalize_answer, Country, ContinentFilter, CountryTable, GeoPoint};
use geo_scoring::{pixel_to_lat_lon, PinSession, ScoringError};
use quiz_engine::{
    ChoiceKind, ChoiceRound, CityMatchRound, GameKind, MagnitudeRound, Metric, QuizError,
    SessionScore, Side, SpellingRound, CITIES_PER_ROUND,
};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;

/// Shared inputs for one play-through
pub struct GameContext<'a> {
    pub table: &'a CountryTable,
    pub graph: &'a BorderGraph<'a>,
    pub filter: ContinentFilter,
    pub rounds: u32,
}

impl<'a> GameContext<'a> {
    fn pool(&self) -> Vec<&'a Country> {
        self.table.filter(self.filter)
    }
}

/// Result of a play-through, finished or abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub kind: GameKind,
    pub session: SessionScore,
    /// Leaderboard points
    pub points: u64,
}

impl GameOutcome {
    fn counted(kind: GameKind, session: SessionScore) -> Self {
        Self {
            kind,
            session,
            points: u64::from(session.correct()),
        }
    }
}

fn unplayable<R, W>(
    kind: GameKind,
    session: SessionScore,
    console: &mut Console<R, W>,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
{
    console.say("Not enough countries for this filter. Try another continent.")?;
    Ok(GameOutcome::counted(kind, session))
}

/// `lat, lon` in degrees, or `@x, y` as a fraction of the world map
fn parse_point(line: &str) -> Option<GeoPoint> {
    let (fraction, body) = match line.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let mut parts = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let a: f64 = parts.next()?.parse().ok()?;
    let b: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let point = if fraction {
        if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) {
            return None;
        }
        pixel_to_lat_lon(a, b)
    } else {
        GeoPoint::new(a, b)
    };
    Some(point).filter(GeoPoint::is_valid)
}

pub fn play_pin<R, W, G>(
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut session = SessionScore::new();
    let mut pin = match PinSession::new(ctx.pool(), rng) {
        Ok(pin) => pin,
        Err(ScoringError::InsufficientData) => return unplayable(GameKind::Pin, session, console),
        Err(e) => return Err(e.into()),
    };
    console.say("Drop a pin as `lat, lon` or `@x, y` on the map (q to quit).")?;

    'rounds: for i in 0..ctx.rounds {
        if i > 0 {
            pin.next_round(rng)?;
        }
        console.say(format_args!("Round {}: where is {}?", session.round(), pin.target().name))?;

        let point = loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            match parse_point(&line) {
                Some(point) => break point,
                None => console.say("Enter a latitude and longitude, e.g. `48.8, 2.3`.")?,
            }
        };

        let outcome = pin.guess(point)?.clone();
        let nearest = outcome.nearest.map_or("nowhere", |c| c.name.as_str());
        console.say(format_args!(
            "{:.0} km away, {} points. Closest country: {}.{}",
            outcome.distance_km,
            outcome.score,
            nearest,
            if outcome.hit { " Bullseye!" } else { "" }
        ))?;
        session.record_answer(outcome.hit)?;
        session.next_round();
    }

    console.say(format_args!("Total score: {}", pin.total_score()))?;
    Ok(GameOutcome {
        kind: GameKind::Pin,
        session,
        points: pin.total_score(),
    })
}

fn trail_text(trail: &Trail<'_>) -> String {
    trail
        .chain_countries()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}

pub fn play_trail<R, W, G>(
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let eligible = ctx.graph.eligible(ctx.filter);
    let mut session = SessionScore::new();
    console.say("Name a country bordering the last one in the trail.")?;
    console.say("Type skip for a new pair or q to quit.")?;

    'rounds: for _ in 0..ctx.rounds {
        let mut trail = match Trail::random_winnable(ctx.graph, eligible.clone(), rng) {
            Ok(trail) => trail,
            Err(ChainError::InsufficientData) => {
                return unplayable(GameKind::Trail, session, console)
            }
            Err(e) => return Err(e.into()),
        };
        let end = trail.end().map_or("?", |c| c.name.as_str());
        console.say(format_args!(
            "Round {}: get from {} to {}.",
            session.round(),
            trail.start().map_or("?", |c| c.name.as_str()),
            end
        ))?;

        loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            if line.eq_ignore_ascii_case("skip") || line.eq_ignore_ascii_case("new") {
                let par = trail
                    .par()
                    .map_or_else(|| "no route".to_string(), |p| format!("par {}", p));
                console.say(format_args!("Skipped ({}).", par))?;
                session.record_answer(false)?;
                session.next_round();
                break;
            }
            match trail.guess(&line) {
                Ok(hop) if hop.won => {
                    let par = trail.par().map_or_else(|| "?".to_string(), |p| p.to_string());
                    console.say(format_args!(
                        "Made it in {} steps (par {}): {}",
                        trail.steps(),
                        par,
                        trail_text(&trail)
                    ))?;
                    session.record_answer(true)?;
                    session.next_round();
                    break;
                }
                Ok(_) => console.say(trail_text(&trail))?,
                Err(e) => console.say(e)?,
            }
        }
    }

    Ok(GameOutcome::counted(GameKind::Trail, session))
}

/// Capital, native name and flag quizzes
pub fn play_choice<R, W, G>(
    kind: ChoiceKind,
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let game = match kind {
        ChoiceKind::Capital => GameKind::Capital,
        ChoiceKind::NativeName => GameKind::Native,
        ChoiceKind::Flag => GameKind::Flag,
    };
    let pool = ctx.pool();
    let mut session = SessionScore::new();
    console.say("Answer with the option number or its text (q to quit).")?;

    'rounds: for _ in 0..ctx.rounds {
        let mut round = match ChoiceRound::new(kind, &pool, ctx.table, rng) {
            Ok(round) => round,
            Err(QuizError::InsufficientData) => return unplayable(game, session, console),
            Err(e) => return Err(e.into()),
        };
        console.say(format_args!("Round {}: {}", session.round(), round.question()))?;
        for (i, option) in round.options().iter().enumerate() {
            console.say(format_args!("  {}. {}", i + 1, option))?;
        }

        let result = loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            let picked = match line.parse::<usize>() {
                Ok(n) if n >= 1 => round.answer_index(n - 1),
                _ => round.answer(&line),
            };
            match picked {
                Ok(result) => break result.clone(),
                Err(e @ QuizError::UnknownOption(_)) => console.say(e)?,
                Err(e) => return Err(e.into()),
            }
        };

        if result.correct {
            console.say("Correct!")?;
        } else {
            console.say(format_args!("No, it was {}.", result.expected))?;
        }
        session.record_answer(result.correct)?;
        session.next_round();
    }

    Ok(GameOutcome::counted(game, session))
}

pub fn play_spelling<R, W, G>(
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let pool = ctx.pool();
    let mut session = SessionScore::new();
    console.say("Type the capital (q to quit).")?;

    'rounds: for _ in 0..ctx.rounds {
        let mut round = match SpellingRound::new(&pool, rng) {
            Ok(round) => round,
            Err(QuizError::InsufficientData) => {
                return unplayable(GameKind::Spelling, session, console)
            }
            Err(e) => return Err(e.into()),
        };
        console.say(format_args!("Round {}: {}", session.round(), round.question()))?;

        let correct = loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            match round.answer(&line) {
                Ok(correct) => break correct,
                Err(QuizError::EmptyAnswer) => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if correct {
            console.say("Correct!")?;
        } else {
            console.say(format_args!("No, it's {}.", round.target().capital))?;
        }
        session.record_answer(correct)?;
        session.next_round();
    }

    Ok(GameOutcome::counted(GameKind::Spelling, session))
}

fn parse_side(line: &str, round: &MagnitudeRound<'_>) -> Option<Side> {
    let answer = normalize_answer(line);
    match answer.as_str() {
        "1" | "l" | "left" => Some(Side::Left),
        "2" | "r" | "right" => Some(Side::Right),
        _ if normalize_answer(&round.left().name) == answer => Some(Side::Left),
        _ if normalize_answer(&round.right().name) == answer => Some(Side::Right),
        _ => None,
    }
}

pub fn play_bigger<R, W, G>(
    metric: Metric,
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let pool = ctx.pool();
    let mut session = SessionScore::new();
    console.say(format_args!("Which country has the larger {}? (q to quit)", metric))?;

    'rounds: for _ in 0..ctx.rounds {
        let mut round = match MagnitudeRound::new(&pool, metric, rng) {
            Ok(round) => round,
            Err(QuizError::InsufficientData) => {
                return unplayable(GameKind::Bigger, session, console)
            }
            Err(e) => return Err(e.into()),
        };
        console.say(format_args!(
            "Round {}: 1. {}  or  2. {}",
            session.round(),
            round.left().name,
            round.right().name
        ))?;

        let side = loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            match parse_side(&line, &round) {
                Some(side) => break side,
                None => console.say("Pick 1 or 2.")?,
            }
        };

        let correct = round.answer(side)?;
        console.say(format_args!(
            "{} {}: {} vs {}: {}",
            if correct { "Correct!" } else { "No." },
            round.left().name,
            metric.describe(round.left()),
            round.right().name,
            metric.describe(round.right())
        ))?;
        session.record_answer(correct)?;
        session.next_round();
    }

    Ok(GameOutcome::counted(GameKind::Bigger, session))
}

fn show_board<R, W>(round: &CityMatchRound<'_>, console: &mut Console<R, W>) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for (i, country) in round.countries().iter().enumerate() {
        let placed = round.placement(&country.code).unwrap_or("_");
        console.say(format_args!("  {}. {} ({}): {}", i + 1, country.name, country.code, placed))?;
    }
    console.say(format_args!("  Tray: {}", round.unplaced().join(", ")))
}

/// Board slot by 1-based number or country code
fn slot_code<'a>(round: &CityMatchRound<'a>, slot: &str) -> Option<&'a str> {
    let countries = round.countries();
    let country = match slot.parse::<usize>() {
        Ok(n) if n >= 1 => countries.get(n - 1).copied(),
        _ => countries.iter().copied().find(|c| c.code.eq_ignore_ascii_case(slot)),
    };
    country.map(|c| c.code.as_str())
}

pub fn play_map<R, W, G>(
    ctx: &GameContext<'_>,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<GameOutcome>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let pool = ctx.pool();
    let mut session = SessionScore::new();
    let mut placed_right: u64 = 0;
    console.say("Place capitals with `<slot> <capital>` or `clear <slot>`.")?;
    console.say("Type check when the board is full, q to quit.")?;

    'rounds: for _ in 0..ctx.rounds {
        let mut round = match CityMatchRound::new(&pool, rng) {
            Ok(round) => round,
            Err(QuizError::InsufficientData) => return unplayable(GameKind::Map, session, console),
            Err(e) => return Err(e.into()),
        };
        console.say(format_args!("Round {}:", session.round()))?;
        show_board(&round, console)?;

        let correct = loop {
            let Some(line) = console.ask(">")? else {
                break 'rounds;
            };
            let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
            let rest = rest.trim();

            let outcome = if command.eq_ignore_ascii_case("check") {
                match round.check() {
                    Ok(correct) => break correct,
                    Err(e) => Err(e),
                }
            } else if command.eq_ignore_ascii_case("clear") {
                match slot_code(&round, rest) {
                    Some(code) => round.remove(code).map(|_| ()),
                    None => Err(QuizError::UnknownCountry(rest.to_string())),
                }
            } else {
                match slot_code(&round, command) {
                    Some(code) => round.place(rest, code).map(|displaced| {
                        if let Some(capital) = displaced {
                            debug!("{} back to the tray", capital);
                        }
                    }),
                    None => Err(QuizError::UnknownCountry(command.to_string())),
                }
            };

            match outcome {
                Ok(()) => show_board(&round, console)?,
                Err(e) => console.say(e)?,
            }
        };

        console.say(format_args!("{} of {} correct.", correct, round.countries().len()))?;
        for country in round.countries().iter().filter(|c| !round.is_correct(&c.code)) {
            console.say(format_args!("  {} is the capital of {}", country.capital, country.name))?;
        }
        // A round counts as correct only when the whole board is right
        placed_right += u64::try_from(correct)?;
        session.record_answer(correct == CITIES_PER_ROUND)?;
        session.next_round();
    }

    Ok(GameOutcome {
        kind: GameKind::Map,
        session,
        points: placed_right,
    })
}
