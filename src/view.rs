//! Per-frame visual snapshot
//!
//! Everything a renderer needs to draw the current screen, detached from
//! the simulation types. Serializable so a host can ship it elsewhere.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;
use crate::ranking::RankingEntry;
use crate::sim::bonus::BonusKind;
use crate::sim::rect::Rect;
use crate::sim::state::{GameState, RunningGame};
use crate::sim::tick::Game;
use crate::sim::tile::TileKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub rect: Rect,
    pub fiery: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub rect: Rect,
    pub kind: TileKind,
    /// Cracked glass or armed unstable tile
    pub hit: bool,
    pub tint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusView {
    pub rect: Rect,
    pub kind: BonusKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub center: IVec2,
    pub frame: u32,
}

/// The playfield of a running game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldView {
    pub level_number: u32,
    pub lives: i32,
    pub score: u64,
    pub paused: bool,
    /// Level cleared, waiting for the player to continue
    pub finished: bool,
    pub paddle: Rect,
    pub magnetic: bool,
    pub confused: bool,
    pub balls: Vec<BallView>,
    pub tiles: Vec<TileView>,
    pub bonuses: Vec<BonusView>,
    pub explosions: Vec<ExplosionView>,
}

impl PlayfieldView {
    fn capture(run: &RunningGame) -> Self {
        let level = &run.level;
        let archetype = level.archetype;
        Self {
            level_number: run.level_number,
            lives: run.lives.clamp(0, MAX_LIVES),
            score: run.score,
            paused: level.paused,
            finished: level.finished,
            paddle: level.paddle.rect,
            magnetic: level.paddle.is_magnetic,
            confused: level.paddle.is_confused,
            balls: level
                .balls
                .iter()
                .map(|b| BallView {
                    rect: b.rect(&archetype),
                    fiery: archetype.fiery,
                })
                .collect(),
            tiles: level
                .tiles
                .iter()
                .map(|t| TileView {
                    rect: t.rect,
                    kind: t.kind,
                    hit: t.hit,
                    tint: t.tint.clone(),
                })
                .collect(),
            bonuses: level
                .bonuses
                .iter()
                .map(|b| BonusView {
                    rect: b.rect,
                    kind: b.kind,
                })
                .collect(),
            explosions: level
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    center: e.center,
                    frame: e.frame(),
                })
                .collect(),
        }
    }
}

/// What the current screen looks like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameView {
    Start {
        /// The "click to start" prompt is visible this frame
        prompt_visible: bool,
    },
    Running(PlayfieldView),
    NameEntry {
        title: String,
        score: u64,
        name: String,
        qualifies: bool,
    },
    Ranking {
        entries: Vec<RankingEntry>,
        highlight: Option<usize>,
    },
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        match state {
            GameState::StartScreen(screen) => FrameView::Start {
                prompt_visible: (screen.ticks / 30) % 2 == 0,
            },
            GameState::RunningGame(run) => FrameView::Running(PlayfieldView::capture(run)),
            GameState::RankingTransition(entry) => FrameView::NameEntry {
                title: entry.title().to_string(),
                score: entry.final_score,
                name: entry.name.clone(),
                qualifies: entry.qualifies,
            },
            GameState::Ranking(screen) => FrameView::Ranking {
                entries: screen.ranking.entries.clone(),
                highlight: screen.highlight,
            },
        }
    }
}

impl Game {
    /// Snapshot of the current screen
    pub fn view(&self) -> FrameView {
        FrameView::capture(self.state())
    }
}
