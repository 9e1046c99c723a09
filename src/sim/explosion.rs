//! Cosmetic blast entities; they animate even while the game is paused

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_FRAMES, EXPLOSION_TICKS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explosion {
    pub center: IVec2,
    /// Ticks since spawn
    pub age: u32,
    /// Only the blast center plays a sound
    pub muted: bool,
}

impl Explosion {
    pub fn new(center: IVec2, muted: bool) -> Self {
        Self {
            center,
            age: 0,
            muted,
        }
    }

    pub fn advance(&mut self) {
        self.age += 1;
    }

    pub fn is_done(&self) -> bool {
        self.age >= EXPLOSION_TICKS
    }

    /// Animation frame index in `0..EXPLOSION_FRAMES`
    pub fn frame(&self) -> u32 {
        (self.age * EXPLOSION_FRAMES / EXPLOSION_TICKS).min(EXPLOSION_FRAMES - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_runs_to_completion() {
        let mut blast = Explosion::new(IVec2::new(100, 100), false);
        assert_eq!(blast.frame(), 0);
        for _ in 0..EXPLOSION_TICKS - 1 {
            blast.advance();
        }
        assert!(!blast.is_done());
        assert_eq!(blast.frame(), EXPLOSION_FRAMES - 1);
        blast.advance();
        assert!(blast.is_done());
    }
}
