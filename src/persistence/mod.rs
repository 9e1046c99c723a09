//! Level and ranking storage
//!
//! The game only sees the `LevelSource` and `RankingStore` traits.
//! File-backed and in-memory implementations live in the submodules.

pub mod levels;
pub mod rankings;

pub use levels::{LevelDef, LevelDir, StaticLevels, TileRecord, parse_level};
pub use rankings::{JsonRankingFile, MemoryRankingStore};

use crate::error::{LevelError, PersistenceError};
use crate::ranking::Ranking;

/// Where level definitions come from
pub trait LevelSource {
    /// Load level `number`; `Ok(None)` means there is no such level
    fn load(&self, number: u32) -> Result<Option<LevelDef>, LevelError>;
}

/// Where the leaderboard is kept
pub trait RankingStore {
    /// Load the leaderboard; a store with nothing saved yet yields an empty one
    fn load(&self) -> Result<Ranking, PersistenceError>;
    fn save(&mut self, ranking: &Ranking) -> Result<(), PersistenceError>;
}
