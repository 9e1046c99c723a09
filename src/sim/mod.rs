//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only (one PCG stream per level)
//! - Stable iteration order (flat entity lists, ordered id sets)
//! - No rendering, audio output or file access

pub mod ball;
pub mod bonus;
pub mod collision;
pub mod explosion;
pub mod level;
pub mod paddle;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tile;

pub use ball::{Ball, BallArchetype};
pub use bonus::{Bonus, BonusKind, REGISTRY, roll_bonus};
pub use level::{Level, LevelEvent};
pub use paddle::Paddle;
pub use physics::Axis;
pub use rect::Rect;
pub use state::{GameState, Outcome, RankingScreen, RankingTransition, RunningGame, StartScreen};
pub use tick::{Game, TickReport};
pub use tile::{GridPos, Tile, TileKind};
