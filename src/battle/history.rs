//! Persisted battle log: newest first, capped, stored as a JSON array.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::battle::engine::BattleResult;
use crate::error::Result;

pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    pub id: String,
    pub winner_id: u32,
    pub loser_id: u32,
    pub winner_name: String,
    pub loser_name: String,
    pub rounds: u32,
    /// RFC 3339 timestamp.
    pub date: String,
}

impl BattleRecord {
    pub fn from_result(result: &BattleResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            winner_id: result.winner_id,
            loser_id: result.loser_id,
            winner_name: result.winner_name.clone(),
            loser_name: result.loser_name.clone(),
            rounds: result.rounds,
            date: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub battles: usize,
    /// Hero id -> wins within the retained history.
    pub wins: BTreeMap<u32, usize>,
    pub history: Vec<BattleRecord>,
}

pub fn win_counts(records: &[BattleRecord]) -> BTreeMap<u32, usize> {
    let mut wins = BTreeMap::new();
    for record in records {
        *wins.entry(record.winner_id).or_default() += 1;
    }
    wins
}

/// File-backed history. Like the hero store, every call reads and rewrites the whole file.
#[derive(Debug, Clone)]
pub struct BattleHistory {
    path: PathBuf,
}

impl BattleHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files read as empty history.
    pub fn load(&self) -> Vec<BattleRecord> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "battle history unreadable, starting fresh");
                Vec::new()
            }
        }
    }

    pub fn record(&self, record: BattleRecord) -> Result<Vec<BattleRecord>> {
        let mut records = self.load();
        records.insert(0, record);
        records.truncate(HISTORY_LIMIT);
        self.save(&records)?;
        Ok(records)
    }

    pub fn summary(&self) -> HistorySummary {
        let history = self.load();
        HistorySummary {
            battles: history.len(),
            wins: win_counts(&history),
            history,
        }
    }

    fn save(&self, records: &[BattleRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}-{nanos}.json"))
    }

    fn record(winner: u32, loser: u32) -> BattleRecord {
        BattleRecord {
            id: format!("{winner}-{loser}"),
            winner_id: winner,
            loser_id: loser,
            winner_name: format!("Hero {winner}"),
            loser_name: format!("Hero {loser}"),
            rounds: 5,
            date: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let path = unique_temp_path("herorank-history");
        let history = BattleHistory::new(&path);
        for i in 0..(HISTORY_LIMIT as u32 + 5) {
            history.record(record(i, i + 1)).unwrap();
        }
        let records = history.load();
        assert_eq!(records.len(), HISTORY_LIMIT);
        assert_eq!(records[0].winner_id, HISTORY_LIMIT as u32 + 4);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn summary_counts_wins() {
        let path = unique_temp_path("herorank-history-summary");
        let history = BattleHistory::new(&path);
        history.record(record(1, 2)).unwrap();
        history.record(record(1, 3)).unwrap();
        history.record(record(3, 1)).unwrap();
        let summary = history.summary();
        assert_eq!(summary.battles, 3);
        assert_eq!(summary.wins.get(&1), Some(&2));
        assert_eq!(summary.wins.get(&3), Some(&1));
        assert_eq!(summary.wins.get(&2), None);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_empty() {
        let history = BattleHistory::new(unique_temp_path("herorank-history-missing"));
        assert!(history.load().is_empty());
    }

    #[test]
    fn record_from_result_has_uuid_and_rfc3339_date() {
        let result = BattleResult {
            winner_id: 4,
            loser_id: 9,
            winner_name: "Storm".to_string(),
            loser_name: "Toad".to_string(),
            rounds: 3,
            winner_by_round_limit: false,
            final_hp: [50, 0],
            max_hp: [150, 120],
            log: vec![],
        };
        let rec = BattleRecord::from_result(&result);
        assert!(uuid::Uuid::parse_str(&rec.id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&rec.date).is_ok());
        assert_eq!(rec.winner_name, "Storm");
    }
}
