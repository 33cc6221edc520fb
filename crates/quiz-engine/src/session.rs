//! Game identifiers and per-session scoring

use crate::{QuizError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight mini-games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Pin,
    Trail,
    Flag,
    Native,
    Capital,
    Map,
    Bigger,
    Spelling,
}

impl GameKind {
    pub const ALL: [GameKind; 8] = [
        GameKind::Pin,
        GameKind::Trail,
        GameKind::Flag,
        GameKind::Native,
        GameKind::Capital,
        GameKind::Map,
        GameKind::Bigger,
        GameKind::Spelling,
    ];

    /// Key used in persisted stats
    pub fn key(&self) -> &'static str {
        match self {
            GameKind::Pin => "pin",
            GameKind::Trail => "trail",
            GameKind::Flag => "flag",
            GameKind::Native => "native",
            GameKind::Capital => "capital",
            GameKind::Map => "map",
            GameKind::Bigger => "bigger",
            GameKind::Spelling => "spelling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameKind::Pin => "Pin the Country",
            GameKind::Trail => "Country Trail",
            GameKind::Flag => "Flag Quiz",
            GameKind::Native => "Native Name Quiz",
            GameKind::Capital => "Capital Quiz",
            GameKind::Map => "Map the City",
            GameKind::Bigger => "Which is Bigger?",
            GameKind::Spelling => "Capital Spelling Quiz",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        GameKind::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .ok_or_else(|| format!("unknown game: {}", s))
    }
}

/// Round counter and running score for one play-through.
///
/// `round` starts at 1 and counts the round on screen; `revealed` is set once
/// that round has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionScore {
    round: u32,
    correct: u32,
    revealed: bool,
}

impl Default for SessionScore {
    fn default() -> Self {
        Self {
            round: 1,
            correct: 0,
            revealed: false,
        }
    }
}

impl SessionScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current round's result as a count of correct answers
    pub fn record(&mut self, correct: u32) -> Result<()> {
        if self.revealed {
            return Err(QuizError::AlreadyAnswered);
        }
        self.revealed = true;
        self.correct += correct;
        Ok(())
    }

    pub fn record_answer(&mut self, correct: bool) -> Result<()> {
        self.record(u32::from(correct))
    }

    /// Advance to the next round. An unanswered round is skipped.
    pub fn next_round(&mut self) {
        self.round += 1;
        self.revealed = false;
    }

    /// Start over ("play again")
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Rounds that received an answer
    pub fn rounds_played(&self) -> u32 {
        if self.revealed {
            self.round
        } else {
            self.round - 1
        }
    }

    pub fn share_text(&self, kind: GameKind) -> String {
        let rounds = self.rounds_played();
        format!(
            "I got {} correct in {} round{} on {} in GeoQuest!",
            self.correct,
            rounds,
            if rounds == 1 { "" } else { "s" },
            kind.label()
        )
    }
}
