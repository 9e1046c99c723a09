//! Leaderboard of the best five scores
//!
//! Serialized as a bare JSON array of `{name, score}` objects, best first.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 5;

/// Maximum name length, in characters
pub const NAME_MAX_CHARS: usize = 8;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u64,
}

/// Leaderboard, sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    pub entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore ordering and size on data read from disk
    pub fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        for entry in &mut self.entries {
            if entry.name.chars().count() > NAME_MAX_CHARS {
                entry.name = entry.name.chars().take(NAME_MAX_CHARS).collect();
            }
        }
    }

    /// A score earns a place if the board isn't full or it beats the last entry
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|last| last.score < score)
    }

    /// Insert a score, keeping the board sorted and capped.
    /// Returns the 0-based row it landed on, or None if it didn't qualify.
    pub fn insert(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let entry = RankingEntry {
            name: name.chars().take(NAME_MAX_CHARS).collect(),
            score,
        };
        // Ties go below existing entries
        let row = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(row, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(row)
    }

    pub fn best(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Ranking {
        let mut ranking = Ranking::new();
        for (i, score) in [500, 400, 300, 200, 100].into_iter().enumerate() {
            ranking.insert(&format!("p{i}"), score);
        }
        ranking
    }

    #[test]
    fn test_empty_board_takes_anything() {
        let mut ranking = Ranking::new();
        assert!(ranking.qualifies(0));
        assert_eq!(ranking.insert("ann", 0), Some(0));
        assert_eq!(ranking.best(), Some(0));
    }

    #[test]
    fn test_full_board_needs_to_beat_last() {
        let ranking = full();
        assert_eq!(ranking.len(), MAX_ENTRIES);
        assert!(!ranking.qualifies(100));
        assert!(ranking.qualifies(101));
    }

    #[test]
    fn test_insert_keeps_order_and_cap() {
        let mut ranking = full();
        assert_eq!(ranking.insert("new", 350), Some(2));
        let scores: Vec<u64> = ranking.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 400, 350, 300, 200]);
        assert_eq!(ranking.insert("low", 50), None);
    }

    #[test]
    fn test_name_truncated() {
        let mut ranking = Ranking::new();
        ranking.insert("abcdefghijkl", 10);
        assert_eq!(ranking.entries[0].name, "abcdefgh");
    }

    #[test]
    fn test_normalize_sorts_loaded_data() {
        let mut ranking: Ranking =
            serde_json::from_str(r#"[{"name":"a","score":1},{"name":"b","score":9}]"#).unwrap();
        ranking.normalize();
        assert_eq!(ranking.entries[0].name, "b");
        assert_eq!(serde_json::to_string(&ranking).unwrap(), r#"[{"name":"b","score":9},{"name":"a","score":1}]"#);
    }
}
