//! One playfield: paddle, balls, tiles, bonuses and explosions
//!
//! The level runs the per-tick update and the collision passes. Anything
//! that touches lives or score leaves as a `LevelEvent` for the running
//! game to apply.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::{Ball, BallArchetype};
use super::bonus::{Bonus, BonusKind, roll_bonus};
use super::collision::{PaddleContact, TileAction, ball_paddle, ball_tile, deflect, resolve_walls};
use super::explosion::Explosion;
use super::paddle::Paddle;
use super::physics::renormalize;
use super::tile::{GridPos, HitOutcome, Tile, TileGrid, TileKind};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::error::LevelError;
use crate::persistence::LevelDef;

/// Things the level reports upward after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    Points(u32),
    BonusCollected(BonusKind),
    /// The last ball fell out
    Death,
    Sound(SoundEffect),
}

#[derive(Debug, Clone)]
pub struct Level {
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub archetype: BallArchetype,
    pub tiles: Vec<Tile>,
    pub grid: TileGrid,
    pub bonuses: Vec<Bonus>,
    pub explosions: Vec<Explosion>,
    pub finished: bool,
    pub paused: bool,
    bonus_chance: f64,
    rng: Pcg32,
    next_id: u32,
    blasts: VecDeque<GridPos>,
    events: Vec<LevelEvent>,
}

impl Level {
    /// Build a playfield from a parsed level definition
    pub fn new(def: &LevelDef, seed: u64, bonus_chance: f64) -> Result<Self, LevelError> {
        let mut level = Self {
            paddle: Paddle::default(),
            balls: Vec::new(),
            archetype: BallArchetype::default(),
            tiles: Vec::with_capacity(def.tiles.len()),
            grid: TileGrid::default(),
            bonuses: Vec::new(),
            explosions: Vec::new(),
            finished: false,
            paused: false,
            bonus_chance,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            blasts: VecDeque::new(),
            events: Vec::new(),
        };

        for record in &def.tiles {
            let id = level.alloc_id();
            if !level.grid.insert(record.cell, id) {
                return Err(LevelError::DuplicateCell {
                    line: record.line,
                    col: record.cell.col,
                    row: record.cell.row,
                });
            }
            let mut tile = Tile::new(id, record.kind, record.cell);
            tile.tint = record.tint.clone();
            level.tiles.push(tile);
        }
        level.spawn_ball();

        log::info!(
            "level {} loaded: {} tiles ({} to clear)",
            def.number,
            level.tiles.len(),
            level.tiles_to_clear()
        );
        Ok(level)
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a fresh ball on the paddle
    fn spawn_ball(&mut self) {
        let id = self.alloc_id();
        self.balls.push(Ball::new(id));
        self.paddle.attach(id);
    }

    /// Tiles that still have to go before the level is cleared
    pub fn tiles_to_clear(&self) -> usize {
        self.tiles.iter().filter(|t| t.counts_for_clear()).count()
    }

    /// Take everything reported since the last drain
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one tick with the frame's pointer delta
    pub fn update(&mut self, dx: i32) {
        if !self.paused && !self.finished {
            self.move_paddle(dx);
            self.move_balls();
            for bonus in &mut self.bonuses {
                bonus.advance();
            }
            self.bonuses.retain(|b| !b.is_gone());

            if self.balls.is_empty() {
                self.events.push(LevelEvent::Death);
            } else if self.tiles_to_clear() == 0 {
                self.finished = true;
                log::info!("level cleared");
                self.events.push(LevelEvent::Sound(SoundEffect::LevelCleared));
            } else {
                self.detect_collisions();
            }
        }

        for blast in &mut self.explosions {
            blast.advance();
        }
        self.explosions.retain(|e| !e.is_done());
    }

    fn move_paddle(&mut self, dx: i32) {
        let applied = self.paddle.slide(dx);
        if applied == 0 {
            return;
        }
        for ball in self.balls.iter_mut().filter(|b| b.attached) {
            ball.pos.x += applied;
        }
    }

    fn move_balls(&mut self) {
        let archetype = self.archetype;
        let mut bounced = false;
        self.balls.retain_mut(|ball| {
            ball.advance();
            let contact = resolve_walls(ball, &archetype);
            bounced |= contact.bounced;
            !contact.lost
        });
        if bounced {
            self.events.push(LevelEvent::Sound(SoundEffect::WallHit));
        }
    }

    /// Paddle against balls, paddle against bonuses, then balls against tiles
    pub fn detect_collisions(&mut self) {
        let archetype = self.archetype;

        for ball in self.balls.iter_mut().filter(|b| !b.attached) {
            if ball.rect(&archetype).overlaps(&self.paddle.rect)
                && ball_paddle(ball, &mut self.paddle, &archetype) == PaddleContact::Deflected
            {
                self.events.push(LevelEvent::Sound(SoundEffect::PaddleHit));
            }
        }

        let paddle_rect = self.paddle.rect;
        let (caught, falling): (Vec<Bonus>, Vec<Bonus>) = std::mem::take(&mut self.bonuses)
            .into_iter()
            .partition(|b| b.rect.overlaps(&paddle_rect));
        self.bonuses = falling;
        for bonus in caught {
            log::debug!("bonus {:?} collected", bonus.kind);
            self.events.push(LevelEvent::Points(BONUS_POINTS));
            self.events.push(LevelEvent::BonusCollected(bonus.kind));
            self.events.push(LevelEvent::Sound(bonus.kind.info().sound));
        }

        for i in 0..self.balls.len() {
            if self.balls[i].attached {
                continue;
            }
            let ball_rect = self.balls[i].rect(&archetype);
            let Some(t) = self.tiles.iter().position(|t| t.rect.overlaps(&ball_rect)) else {
                continue;
            };
            let contact = ball_tile(&mut self.balls[i], &self.tiles[t], &archetype);
            match contact.action {
                TileAction::Burn => self.destroy_tile(t, true),
                TileAction::Hit => self.hit_tile(t),
            }
        }

        self.run_blasts();
    }

    fn hit_tile(&mut self, index: usize) {
        let tile = &mut self.tiles[index];
        match tile.on_hit() {
            HitOutcome::Damaged { points } => {
                self.events.push(LevelEvent::Points(points));
                let cue = if tile.kind == TileKind::Glass {
                    SoundEffect::GlassCrack
                } else {
                    SoundEffect::UnstableArm
                };
                self.events.push(LevelEvent::Sound(cue));
            }
            HitOutcome::Destroyed => self.destroy_tile(index, false),
            HitOutcome::Absorbed => self.events.push(LevelEvent::Sound(SoundEffect::BrickHit)),
        }
    }

    /// Remove a tile, score it, maybe drop a bonus and queue its blast
    fn destroy_tile(&mut self, index: usize, burn: bool) {
        let tile = self.tiles.remove(index);
        self.grid.remove(tile.cell);
        self.events.push(LevelEvent::Points(tile.kind.destroy_points()));

        match tile.kind {
            TileKind::Glass => self.events.push(LevelEvent::Sound(SoundEffect::GlassShatter)),
            TileKind::Regular | TileKind::Brick => {
                self.events.push(LevelEvent::Sound(SoundEffect::TileBreak))
            }
            TileKind::Unstable | TileKind::Explosive => {}
        }

        if let Some(bonus) = roll_bonus(&mut self.rng, tile.rect.center(), self.bonus_chance) {
            log::debug!("bonus {:?} dropped at {:?}", bonus.kind, tile.cell);
            self.bonuses.push(bonus);
        }
        if burn || tile.kind.explodes() {
            self.blasts.push_back(tile.cell);
        }
    }

    /// Drain the blast queue, including blasts set off by other blasts
    fn run_blasts(&mut self) {
        while let Some(cell) = self.blasts.pop_front() {
            self.explode(cell);
        }
    }

    /// Blast the 3x3 neighborhood of `cell`
    pub fn explode(&mut self, cell: GridPos) {
        log::debug!("explosion at {:?}", cell);
        self.events.push(LevelEvent::Sound(SoundEffect::Explosion));
        for pos in cell.blast_area() {
            self.explosions
                .push(Explosion::new(pos.rect().center(), pos != cell));
            let Some(id) = self.grid.get(pos) else {
                continue;
            };
            if let Some(index) = self.tiles.iter().position(|t| t.id == id) {
                self.destroy_tile(index, false);
            }
        }
    }

    /// Reset after a life loss: one ball on a fresh paddle, no bonuses
    pub fn on_death(&mut self) {
        self.archetype.reset();
        self.bonuses.clear();
        self.balls.clear();
        self.paddle = Paddle::default();
        self.spawn_ball();
    }

    /// Launch every ball resting on the paddle
    pub fn release_balls(&mut self) {
        if self.paused || self.finished {
            return;
        }
        let archetype = self.archetype;
        let mut launched = false;
        for ball in self.balls.iter_mut().filter(|b| b.attached) {
            deflect(ball, &mut self.paddle, &archetype);
            launched = true;
        }
        if launched {
            self.events.push(LevelEvent::Sound(SoundEffect::PaddleHit));
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.finished {
            self.paused = !self.paused;
        }
    }

    /// Add a mirrored twin of every ball
    pub fn split_balls(&mut self) {
        let count = self.balls.len();
        for i in 0..count {
            let id = self.alloc_id();
            let twin = self.balls[i].mirrored(id);
            if twin.attached {
                self.paddle.attach(id);
            }
            self.balls.push(twin);
        }
    }

    /// Every ball to top speed
    pub fn speed_up_balls(&mut self) {
        for ball in &mut self.balls {
            ball.vel = renormalize(ball.vel, BALL_MAX_SPEED);
        }
    }
}
