//! Ball-Z headless runner
//!
//! Loads settings, levels and the leaderboard from disk and plays the game
//! with a simple autopilot at the configured frame rate. Rendering is left
//! to hosts that consume `FrameView`.

use std::path::PathBuf;
use std::time::Duration;

use ballz::audio::{AudioSink, LogAudio};
use ballz::persistence::{JsonRankingFile, LevelDir};
use ballz::platform::InputEvent;
use ballz::sim::Game;
use ballz::view::{FrameView, PlayfieldView};
use ballz::{GameError, Settings};

const DEFAULT_SETTINGS_PATH: &str = "ballz.json";
/// Autopilot paddle speed, pixels per frame
const PILOT_SPEED: i32 = 24;
const PILOT_NAME: &str = "AUTO";

fn main() {
    env_logger::init();
    log::info!("Ball-Z (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path);

    if let Err(e) = run(settings) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(settings: Settings) -> Result<(), GameError> {
    let levels = LevelDir::new(&settings.levels_dir);
    let rankings = JsonRankingFile::new(&settings.ranking_path);
    let mut audio = LogAudio::new(settings.sfx_volume);
    let frame = settings.frame_duration();
    let life_pause = Duration::from_millis(settings.life_lost_pause_ms);
    let budget = settings.demo_frames;

    let mut game = Game::new(settings, Box::new(levels), Box::new(rankings));
    let mut pilot = Autopilot::default();
    let mut frames: u64 = 0;

    while !pilot.done {
        let input = pilot.next(&game.view());
        let report = game.tick(&input)?;
        for cue in &report.sounds {
            audio.play(*cue);
        }
        if report.quit {
            break;
        }
        if report.life_lost {
            std::thread::sleep(life_pause);
        }

        frames += 1;
        if budget > 0 && frames >= budget {
            log::info!("frame budget of {budget} reached");
            break;
        }
        std::thread::sleep(frame);
    }

    if let FrameView::Ranking { entries, .. } = game.view() {
        for (i, entry) in entries.iter().enumerate() {
            log::info!("#{} {:<8} {}", i + 1, entry.name, entry.score);
        }
    }
    log::info!("stopped after {frames} frames");
    Ok(())
}

/// Plays a single run: starts it, chases the lowest ball, enters a name,
/// then stops on the leaderboard.
#[derive(Debug, Default)]
struct Autopilot {
    frame: u64,
    started: bool,
    typed: usize,
    done: bool,
}

impl Autopilot {
    fn next(&mut self, view: &FrameView) -> Vec<InputEvent> {
        self.frame += 1;
        match view {
            FrameView::Start { .. } if !self.started => {
                self.started = true;
                vec![InputEvent::Primary]
            }
            FrameView::Start { .. } => {
                self.done = true;
                Vec::new()
            }
            FrameView::Running(field) => self.play(field),
            FrameView::NameEntry { qualifies, .. } => {
                match PILOT_NAME.chars().nth(self.typed) {
                    Some(c) if *qualifies => {
                        self.typed += 1;
                        vec![InputEvent::Text(c)]
                    }
                    _ => vec![InputEvent::Confirm],
                }
            }
            FrameView::Ranking { .. } => {
                self.done = true;
                Vec::new()
            }
        }
    }

    fn play(&mut self, field: &PlayfieldView) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Launch attached balls and move past cleared levels
        if self.frame % 30 == 0 {
            events.push(InputEvent::Primary);
        }

        let paddle_x = field.paddle.center().x;
        let target = field
            .balls
            .iter()
            .max_by_key(|b| b.rect.bottom())
            .map(|b| b.rect.center().x)
            .unwrap_or(paddle_x);
        let mut dx = (target - paddle_x).clamp(-PILOT_SPEED, PILOT_SPEED);
        if field.confused {
            dx = -dx;
        }
        if dx != 0 {
            events.push(InputEvent::PointerMotion(dx));
        }
        events
    }
}
