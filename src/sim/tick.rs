//! Fixed timestep game tick
//!
//! `Game::tick` is the single transition function: it consumes one frame of
//! input, advances whatever screen is active and returns what the host has
//! to act on (sounds, the life-loss pause, quitting).

use super::level::Level;
use super::state::{
    GameState, Outcome, RankingScreen, RankingTransition, RunningGame, StartScreen,
};
use crate::audio::SoundEffect;
use crate::error::GameError;
use crate::persistence::{LevelSource, RankingStore};
use crate::platform::{InputEvent, pointer_delta};
use crate::ranking::Ranking;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The host should hold the frame for `life_lost_pause_ms`
    pub life_lost: bool,
    /// Cancel was pressed on the start screen
    pub quit: bool,
    pub sounds: Vec<SoundEffect>,
}

/// The whole game: screen state plus the collaborators it needs
pub struct Game {
    state: GameState,
    settings: Settings,
    levels: Box<dyn LevelSource>,
    rankings: Box<dyn RankingStore>,
}

impl Game {
    pub fn new(
        settings: Settings,
        levels: Box<dyn LevelSource>,
        rankings: Box<dyn RankingStore>,
    ) -> Self {
        Self {
            state: GameState::default(),
            settings,
            levels,
            rankings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and debugging tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance one frame.
    ///
    /// On error the game is left on the start screen.
    pub fn tick(&mut self, input: &[InputEvent]) -> Result<TickReport, GameError> {
        let mut report = TickReport::default();
        let current = std::mem::take(&mut self.state);
        let from = current.name();

        let next = match current {
            GameState::StartScreen(screen) => self.tick_start(screen, input, &mut report)?,
            GameState::RunningGame(run) => self.tick_running(run, input, &mut report)?,
            GameState::RankingTransition(entry) => self.tick_name_entry(entry, input),
            GameState::Ranking(screen) => tick_ranking(screen, input),
        };

        if next.name() != from {
            log::info!("state {} -> {}", from, next.name());
        }
        self.state = next;
        Ok(report)
    }

    fn tick_start(
        &mut self,
        mut screen: StartScreen,
        input: &[InputEvent],
        report: &mut TickReport,
    ) -> Result<GameState, GameError> {
        screen.ticks += 1;
        for event in input {
            match event {
                InputEvent::Primary => return self.start_run().map(GameState::RunningGame),
                InputEvent::ShowRanking => {
                    return Ok(GameState::Ranking(RankingScreen {
                        ranking: self.load_ranking(),
                        highlight: None,
                    }));
                }
                InputEvent::Cancel => report.quit = true,
                _ => {}
            }
        }
        Ok(GameState::StartScreen(screen))
    }

    fn start_run(&self) -> Result<RunningGame, GameError> {
        let number = self.settings.start_level;
        let level = self.load_level(number)?.ok_or(GameError::NoLevel(number))?;
        log::info!("new run from level {number}");
        Ok(RunningGame::new(number, level, self.settings.starting_lives))
    }

    /// Load and build level `number`; `Ok(None)` if it doesn't exist
    fn load_level(&self, number: u32) -> Result<Option<Level>, GameError> {
        let to_game = |source| GameError::Level { number, source };
        let Some(def) = self.levels.load(number).map_err(to_game)? else {
            return Ok(None);
        };
        let level = Level::new(
            &def,
            self.settings.level_seed(number),
            self.settings.bonus_chance,
        )
        .map_err(to_game)?;
        Ok(Some(level))
    }

    fn load_ranking(&self) -> Ranking {
        self.rankings.load().unwrap_or_else(|e| {
            log::warn!("ranking unreadable, starting empty: {e}");
            Ranking::new()
        })
    }

    fn tick_running(
        &mut self,
        mut run: RunningGame,
        input: &[InputEvent],
        report: &mut TickReport,
    ) -> Result<GameState, GameError> {
        run.life_lost = false;
        let mut advance = false;

        for event in input {
            match event {
                InputEvent::Cancel => return Ok(GameState::StartScreen(StartScreen::default())),
                InputEvent::Pause => run.level.toggle_pause(),
                InputEvent::Primary if run.level.finished => advance = true,
                InputEvent::Primary => run.level.release_balls(),
                _ => {}
            }
        }

        if advance {
            run.level_number += 1;
            match self.load_level(run.level_number)? {
                Some(level) => {
                    log::info!("advancing to level {}", run.level_number);
                    run.level = level;
                }
                None => {
                    log::info!("no level {}, run won", run.level_number);
                    run.outcome = Some(Outcome::Won);
                }
            }
        }

        if run.outcome.is_none() {
            run.level.update(pointer_delta(input));
            run.apply_level_events(&mut report.sounds);
        }
        report.life_lost = run.life_lost;

        match run.outcome {
            Some(outcome) => {
                let score = run.final_score();
                log::info!("run over ({outcome:?}), final score {score}");
                Ok(GameState::RankingTransition(RankingTransition::new(
                    score,
                    outcome,
                    self.load_ranking(),
                )))
            }
            None => Ok(GameState::RunningGame(run)),
        }
    }

    fn tick_name_entry(&mut self, mut entry: RankingTransition, input: &[InputEvent]) -> GameState {
        for event in input {
            match event {
                InputEvent::Text(c) => entry.push_char(*c),
                InputEvent::Backspace => entry.backspace(),
                InputEvent::Cancel => return GameState::StartScreen(StartScreen::default()),
                InputEvent::Confirm => return self.confirm_entry(entry),
                _ => {}
            }
        }
        GameState::RankingTransition(entry)
    }

    fn confirm_entry(&mut self, entry: RankingTransition) -> GameState {
        let RankingTransition {
            mut ranking,
            qualifies,
            name,
            final_score,
            ..
        } = entry;

        let highlight = if qualifies {
            let row = ranking.insert(&name, final_score);
            if let Err(e) = self.rankings.save(&ranking) {
                log::error!("failed to save ranking: {e}");
            }
            row
        } else {
            None
        };
        GameState::Ranking(RankingScreen { ranking, highlight })
    }
}

fn tick_ranking(screen: RankingScreen, input: &[InputEvent]) -> GameState {
    let leave = input.iter().any(|e| {
        matches!(
            e,
            InputEvent::Primary | InputEvent::Cancel | InputEvent::ShowRanking
        )
    });
    if leave {
        GameState::StartScreen(StartScreen::default())
    } else {
        GameState::Ranking(screen)
    }
}
