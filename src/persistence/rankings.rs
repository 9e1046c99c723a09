//! Leaderboard stores

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::RankingStore;
use crate::error::PersistenceError;
use crate::ranking::Ranking;

/// Leaderboard kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonRankingFile {
    path: PathBuf,
}

impl JsonRankingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RankingStore for JsonRankingFile {
    fn load(&self) -> Result<Ranking, PersistenceError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Ranking::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ranking: Ranking = serde_json::from_str(&json)?;
        ranking.normalize();
        log::info!("loaded {} ranking entries from {}", ranking.len(), self.path.display());
        Ok(ranking)
    }

    fn save(&mut self, ranking: &Ranking) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(ranking)?;
        std::fs::write(&self.path, json)?;
        log::info!("ranking saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory leaderboard. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRankingStore {
    ranking: Rc<RefCell<Ranking>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryRankingStore {
    pub fn new(ranking: Ranking) -> Self {
        Self {
            ranking: Rc::new(RefCell::new(ranking)),
            saves: Rc::default(),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> Ranking {
        self.ranking.borrow().clone()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl RankingStore for MemoryRankingStore {
    fn load(&self) -> Result<Ranking, PersistenceError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, ranking: &Ranking) -> Result<(), PersistenceError> {
        *self.ranking.borrow_mut() = ranking.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
