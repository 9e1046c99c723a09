//! Falling bonuses and the static table of their effects

use glam::IVec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::RunningGame;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Bonus kinds, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Death,
    Life,
    SpeedUp,
    FireBall,
    Split,
    Magnet,
    Enlarge,
    Shrink,
    Confuse,
}

/// One registry row
pub struct BonusType {
    pub kind: BonusKind,
    /// Relative drop weight; always positive
    pub weight: u32,
    pub sound: SoundEffect,
    effect: fn(&mut RunningGame),
}

impl std::fmt::Debug for BonusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BonusType")
            .field("kind", &self.kind)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Every bonus the game can drop, indexed by `BonusKind as usize`
pub static REGISTRY: [BonusType; 9] = [
    BonusType {
        kind: BonusKind::Death,
        weight: 3,
        sound: SoundEffect::BonusNegative,
        effect: death,
    },
    BonusType {
        kind: BonusKind::Life,
        weight: 1,
        sound: SoundEffect::BonusPositive,
        effect: extra_life,
    },
    BonusType {
        kind: BonusKind::SpeedUp,
        weight: 4,
        sound: SoundEffect::BonusNegative,
        effect: speed_up,
    },
    BonusType {
        kind: BonusKind::FireBall,
        weight: 3,
        sound: SoundEffect::BonusPositive,
        effect: fire_ball,
    },
    BonusType {
        kind: BonusKind::Split,
        weight: 4,
        sound: SoundEffect::BonusPositive,
        effect: split,
    },
    BonusType {
        kind: BonusKind::Magnet,
        weight: 4,
        sound: SoundEffect::BonusPositive,
        effect: magnet,
    },
    BonusType {
        kind: BonusKind::Enlarge,
        weight: 5,
        sound: SoundEffect::BonusPositive,
        effect: enlarge,
    },
    BonusType {
        kind: BonusKind::Shrink,
        weight: 5,
        sound: SoundEffect::BonusNegative,
        effect: shrink,
    },
    BonusType {
        kind: BonusKind::Confuse,
        weight: 4,
        sound: SoundEffect::BonusNegative,
        effect: confuse,
    },
];

impl BonusKind {
    pub fn info(self) -> &'static BonusType {
        &REGISTRY[self as usize]
    }

    /// Run this bonus's effect against the running game
    pub fn apply(self, run: &mut RunningGame) {
        log::debug!("bonus {:?} applied", self);
        (self.info().effect)(run);
    }
}

fn death(run: &mut RunningGame) {
    run.lose_life();
}

fn extra_life(run: &mut RunningGame) {
    if run.lives < MAX_LIVES {
        run.lives += 1;
    } else {
        run.score += LIFE_CAP_POINTS;
    }
}

fn speed_up(run: &mut RunningGame) {
    run.level.speed_up_balls();
}

fn fire_ball(run: &mut RunningGame) {
    run.level.archetype.fiery = true;
}

fn split(run: &mut RunningGame) {
    run.level.split_balls();
}

fn magnet(run: &mut RunningGame) {
    run.level.paddle.is_magnetic = true;
}

fn enlarge(run: &mut RunningGame) {
    let level = run.level.paddle.length_level + 1;
    run.level.paddle.resize(level);
}

fn shrink(run: &mut RunningGame) {
    let level = run.level.paddle.length_level - 1;
    run.level.paddle.resize(level);
}

fn confuse(run: &mut RunningGame) {
    run.level.paddle.is_confused = !run.level.paddle.is_confused;
}

/// A falling bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub rect: Rect,
    /// Pixels per tick, downward
    pub speed: i32,
}

impl Bonus {
    pub fn new(kind: BonusKind, center: IVec2, speed: i32) -> Self {
        Self {
            kind,
            rect: Rect::from_center(center, BONUS_SIZE, BONUS_SIZE),
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(IVec2::new(0, self.speed));
    }

    /// Fell out of the playfield
    pub fn is_gone(&self) -> bool {
        self.rect.top() >= SCREEN_HEIGHT + MARGIN
    }
}

/// Maybe drop a bonus at `center`.
///
/// Drops with probability `chance`; the kind follows the registry weights
/// and the fall speed is uniform in the configured range.
pub fn roll_bonus<R: Rng + ?Sized>(rng: &mut R, center: IVec2, chance: f64) -> Option<Bonus> {
    if !rng.random_bool(chance.clamp(0.0, 1.0)) {
        return None;
    }
    let dist = WeightedIndex::new(REGISTRY.iter().map(|b| b.weight)).ok()?;
    let kind = REGISTRY[dist.sample(rng)].kind;
    let speed = rng.random_range(BONUS_MIN_FALL_SPEED..=BONUS_MAX_FALL_SPEED);
    Some(Bonus::new(kind, center, speed))
}
