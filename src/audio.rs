//! Sound cues emitted by the simulation
//!
//! The core never plays audio itself: it reports which cue fired on each tick
//! and an `AudioSink` supplied by the host turns cues into sound.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side wall or the ceiling
    WallHit,
    /// Regular tile destroyed
    TileBreak,
    /// Glass tile cracks
    GlassCrack,
    /// Glass tile shatters
    GlassShatter,
    /// Ball bounces off a brick
    BrickHit,
    /// Unstable tile armed
    UnstableArm,
    /// Blast (only the center of a 3x3 blast is audible)
    Explosion,
    /// Helpful bonus collected
    BonusPositive,
    /// Harmful bonus collected
    BonusNegative,
    /// All balls lost
    LifeLost,
    /// Level cleared
    LevelCleared,
}

/// Host-side audio output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that writes cues to the log (headless runs)
#[derive(Debug, Clone)]
pub struct LogAudio {
    sfx_volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LogAudio {
    pub fn new(sfx_volume: f32) -> Self {
        Self {
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        log::trace!("sfx {:?} @ {:.2}", effect, self.sfx_volume);
    }
}
