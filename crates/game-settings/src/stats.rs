//! Lifetime per-game stats

use crate::{KeyValueStore, Result, STATS_KEY};
use chrono::{DateTime, Utc};
use quiz_engine::GameKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatEntry {
    pub total_correct: u32,
    pub total_rounds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,
}

impl GameStatEntry {
    /// Fraction of rounds answered correctly
    pub fn accuracy(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_rounds as f64
        }
    }
}

/// Totals keyed by game, stored as one JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameStats {
    entries: BTreeMap<GameKind, GameStatEntry>,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read stats from the store. Missing or corrupt data is an empty record.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(STATS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable stats: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Could not read stats: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        store.set(STATS_KEY, &serde_json::to_string(self)?)
    }

    /// Fold a finished session into the totals. Sessions with no rounds are
    /// ignored.
    pub fn add_session(&mut self, kind: GameKind, correct: u32, rounds: u32) -> bool {
        self.add_session_at(kind, correct, rounds, Utc::now())
    }

    /// Totals saturate at `u32::MAX`; the store may hold hand-edited values.
    pub fn add_session_at(
        &mut self,
        kind: GameKind,
        correct: u32,
        rounds: u32,
        at: DateTime<Utc>,
    ) -> bool {
        if rounds == 0 {
            return false;
        }
        let entry = self.entries.entry(kind).or_default();
        entry.total_correct = entry.total_correct.saturating_add(correct);
        entry.total_rounds = entry.total_rounds.saturating_add(rounds);
        entry.last_played = Some(at);
        debug!(
            "{}: +{}/{} (total {}/{})",
            kind.key(),
            correct,
            rounds,
            entry.total_correct,
            entry.total_rounds
        );
        true
    }

    pub fn get(&self, kind: GameKind) -> Option<&GameStatEntry> {
        self.entries.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameKind, &GameStatEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_add_session_accumulates() {
        let mut stats = GameStats::new();
        assert!(stats.add_session(GameKind::Capital, 3, 5));
        assert!(stats.add_session(GameKind::Capital, 4, 4));

        let entry = stats.get(GameKind::Capital).unwrap();
        assert_eq!(entry.total_correct, 7);
        assert_eq!(entry.total_rounds, 9);
        assert!((entry.accuracy() - 7.0 / 9.0).abs() < 1e-12);
        assert!(stats.get(GameKind::Flag).is_none());
    }

    #[test]
    fn test_empty_session_ignored() {
        let mut stats = GameStats::new();
        assert!(!stats.add_session(GameKind::Pin, 0, 0));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stored_shape() {
        let mut stats = GameStats::new();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        stats.add_session_at(GameKind::Bigger, 2, 3, at);

        let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["bigger"]["totalCorrect"], 2);
        assert_eq!(json["bigger"]["totalRounds"], 3);
    }

    #[test]
    fn test_reads_entries_without_timestamp() {
        let mut store = MemoryStore::new();
        store
            .set(STATS_KEY, r#"{"trail": {"totalCorrect": 1, "totalRounds": 2}}"#)
            .unwrap();
        let stats = GameStats::load(&store);
        assert_eq!(stats.get(GameKind::Trail).unwrap().total_rounds, 2);
    }

    #[test]
    fn test_totals_saturate_on_huge_stored_values() {
        let mut store = MemoryStore::new();
        let raw = format!(
            r#"{{"flag": {{"totalCorrect": {max}, "totalRounds": {max}}}}}"#,
            max = u32::MAX
        );
        store.set(STATS_KEY, &raw).unwrap();

        let mut stats = GameStats::load(&store);
        assert!(stats.add_session(GameKind::Flag, 3, 5));
        let entry = stats.get(GameKind::Flag).unwrap();
        assert_eq!((entry.total_correct, entry.total_rounds), (u32::MAX, u32::MAX));
        assert!(entry.last_played.is_some());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut stats = GameStats::new();
        stats.add_session(GameKind::Spelling, 1, 1);
        stats.save(&mut store).unwrap();

        assert_eq!(GameStats::load(&store), stats);
    }

    #[test]
    fn test_corrupt_stats_are_empty() {
        let mut store = MemoryStore::new();
        store.set(STATS_KEY, "[1, 2").unwrap();
        assert!(GameStats::load(&store).is_empty());
    }
}
