//! Game settings
//!
//! Stored as JSON next to the binary. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BONUS_CHANCE, FRAME_RATE, STARTING_LIVES};
use crate::error::PersistenceError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Game ===
    /// First level of a new run
    pub start_level: u32,
    /// Spare lives at the start of a run
    pub starting_lives: i32,
    /// Chance that a destroyed tile drops a bonus (0.0 - 1.0)
    pub bonus_chance: f64,
    /// RNG seed; each level mixes in its own number
    pub seed: u64,

    // === Storage ===
    /// Directory holding `<n>.lvl` files
    pub levels_dir: PathBuf,
    /// Leaderboard JSON file
    pub ranking_path: PathBuf,

    // === Timing ===
    pub frame_rate: u32,
    /// Pause after a lost life, in milliseconds
    pub life_lost_pause_ms: u64,
    /// Frames the headless runner plays before stopping (0 = until the run ends)
    pub demo_frames: u64,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_level: 1,
            starting_lives: STARTING_LIVES,
            bonus_chance: DEFAULT_BONUS_CHANCE,
            seed: 0x0ba1_15ee,

            levels_dir: PathBuf::from("levels"),
            ranking_path: PathBuf::from("ranking.json"),

            frame_rate: FRAME_RATE,
            life_lost_pause_ms: 1000,
            demo_frames: 0,

            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Seed for a given level's RNG
    pub fn level_seed(&self, level_number: u32) -> u64 {
        self.seed ^ u64::from(level_number)
    }

    /// Duration of one frame
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
