//! Screen states and the data each one carries
//!
//! `GameState` is the top-level enum the tick function transitions between.
//! Only `RunningGame` owns a live level.

use serde::{Deserialize, Serialize};

use super::level::{Level, LevelEvent};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::ranking::{NAME_MAX_CHARS, Ranking};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Ran out of levels
    Won,
    /// Ran out of lives
    Lost,
}

/// Title screen
#[derive(Debug, Clone, Default)]
pub struct StartScreen {
    /// Ticks spent on the screen (drives the blinking prompt)
    pub ticks: u64,
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct RunningGame {
    pub level_number: u32,
    pub level: Level,
    /// Spare lives; the run ends when this drops below zero
    pub lives: i32,
    pub score: u64,
    pub outcome: Option<Outcome>,
    /// A life was lost during the current tick
    pub life_lost: bool,
}

impl RunningGame {
    pub fn new(level_number: u32, level: Level, lives: i32) -> Self {
        Self {
            level_number,
            level,
            lives,
            score: 0,
            outcome: None,
            life_lost: false,
        }
    }

    /// Lose a life; the level restarts with a single ball, or the run ends
    pub fn lose_life(&mut self) {
        self.lives -= 1;
        self.life_lost = true;
        if self.lives < 0 {
            log::info!("last life lost on level {}", self.level_number);
            self.outcome = Some(Outcome::Lost);
        } else {
            log::info!("life lost, {} left", self.lives);
            self.level.on_death();
        }
    }

    /// Apply what the level reported this tick; sound cues are forwarded.
    ///
    /// Nothing after the end of the run is applied.
    pub fn apply_level_events(&mut self, sounds: &mut Vec<SoundEffect>) {
        for event in self.level.drain_events() {
            if self.outcome.is_some() {
                break;
            }
            match event {
                LevelEvent::Points(points) => self.score += u64::from(points),
                LevelEvent::BonusCollected(kind) => kind.apply(self),
                LevelEvent::Death => {
                    sounds.push(SoundEffect::LifeLost);
                    self.lose_life();
                }
                LevelEvent::Sound(cue) => sounds.push(cue),
            }
        }
    }

    /// Score plus a bonus for every level cleared
    pub fn final_score(&self) -> u64 {
        self.score + u64::from(self.level_number.saturating_sub(1)) * LEVEL_POINTS
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        use crate::persistence::{LevelDef, TileRecord};
        use crate::sim::tile::{GridPos, TileKind};

        let def = LevelDef {
            number: 1,
            tiles: vec![TileRecord {
                line: 1,
                kind: TileKind::Regular,
                cell: GridPos::new(0, 0).unwrap(),
                tint: None,
            }],
        };
        Self::new(1, Level::new(&def, 1, 0.0).unwrap(), STARTING_LIVES)
    }
}

/// Game over: the player may enter a name for the leaderboard
#[derive(Debug, Clone)]
pub struct RankingTransition {
    pub final_score: u64,
    pub outcome: Outcome,
    pub ranking: Ranking,
    /// The score earns a place on the leaderboard
    pub qualifies: bool,
    pub name: String,
}

impl RankingTransition {
    pub fn new(final_score: u64, outcome: Outcome, ranking: Ranking) -> Self {
        let qualifies = ranking.qualifies(final_score);
        Self {
            final_score,
            outcome,
            ranking,
            qualifies,
            name: String::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "Congratulations!",
            Outcome::Lost => "Game over",
        }
    }

    /// Append a typed character; control characters and overlong names are ignored
    pub fn push_char(&mut self, c: char) {
        if self.qualifies && !c.is_control() && self.name.chars().count() < NAME_MAX_CHARS {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }
}

/// Leaderboard display
#[derive(Debug, Clone, Default)]
pub struct RankingScreen {
    pub ranking: Ranking,
    /// Row of the entry just added
    pub highlight: Option<usize>,
}

/// Top-level screen state
#[derive(Debug, Clone)]
pub enum GameState {
    StartScreen(StartScreen),
    RunningGame(RunningGame),
    RankingTransition(RankingTransition),
    Ranking(RankingScreen),
}

impl Default for GameState {
    fn default() -> Self {
        GameState::StartScreen(StartScreen::default())
    }
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::StartScreen(_) => "start",
            GameState::RunningGame(_) => "running",
            GameState::RankingTransition(_) => "ranking-entry",
            GameState::Ranking(_) => "ranking",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_score_adds_level_points() {
        let mut run = RunningGame::for_tests();
        run.score = 1234;
        assert_eq!(run.final_score(), 1234);
        run.level_number = 3;
        assert_eq!(run.final_score(), 1234 + 2000);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut run = RunningGame::for_tests();
        run.lives = 0;
        run.lose_life();
        assert_eq!(run.lives, -1);
        assert_eq!(run.outcome, Some(Outcome::Lost));
    }

    #[test]
    fn test_events_after_game_over_are_dropped() {
        use crate::sim::bonus::{Bonus, BonusKind};
        use glam::IVec2;

        let mut run = RunningGame::for_tests();
        run.lives = 0;
        let center = run.level.paddle.rect.center() - IVec2::new(0, 20);
        run.level.bonuses.push(Bonus::new(BonusKind::Death, center, 4));
        run.level.bonuses.push(Bonus::new(BonusKind::Life, center, 4));
        run.level.update(0);

        let mut sounds = Vec::new();
        run.apply_level_events(&mut sounds);
        assert_eq!(run.lives, -1);
        assert_eq!(run.outcome, Some(Outcome::Lost));
        assert_eq!(run.score, u64::from(BONUS_POINTS));
    }

    #[test]
    fn test_life_loss_resets_level() {
        let mut run = RunningGame::for_tests();
        run.level.archetype.fiery = true;
        run.level.split_balls();
        run.lose_life();
        assert_eq!(run.lives, STARTING_LIVES - 1);
        assert!(run.outcome.is_none());
        assert_eq!(run.level.balls.len(), 1);
        assert!(!run.level.archetype.fiery);
    }

    #[test]
    fn test_name_entry_limits() {
        let mut entry = RankingTransition::new(50, Outcome::Lost, Ranking::default());
        assert!(entry.qualifies);
        for c in "abcdefghij".chars() {
            entry.push_char(c);
        }
        entry.push_char('\n');
        assert_eq!(entry.name, "abcdefgh");
        entry.backspace();
        assert_eq!(entry.name, "abcdefg");
        assert_eq!(entry.title(), "Game over");
    }
}
