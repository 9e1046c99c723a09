//! Ball entity and the archetype flags shared by every ball in a level

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Modifiers that apply to every ball at once, including balls created later
/// (by a Split). Owned by the level and reset when the level restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallArchetype {
    /// Tiles are destroyed outright and explode
    pub fiery: bool,
    /// Half-size hit-box
    pub tiny: bool,
    /// Passes through tiles without bouncing
    pub bullet: bool,
}

impl BallArchetype {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Side length of a ball's hit-box
    pub fn ball_size(&self) -> i32 {
        if self.tiny { TINY_BALL_SIZE } else { BALL_SIZE }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center position
    pub pos: IVec2,
    /// Pixels per tick
    pub vel: IVec2,
    /// Resting on the paddle; mirrored by the paddle's attached set
    pub attached: bool,
}

impl Ball {
    /// A fresh ball resting on a fresh paddle
    pub fn new(id: u32) -> Self {
        let third = (BALL_MAX_SPEED / 3.0) as i32;
        Self {
            id,
            pos: IVec2::new(SCREEN_WIDTH / 2 + 10, SCREEN_HEIGHT - MARGIN - 20),
            vel: IVec2::new(third, third),
            attached: true,
        }
    }

    /// Hit-box for the current archetype
    pub fn rect(&self, archetype: &BallArchetype) -> Rect {
        let size = archetype.ball_size();
        Rect::from_center(self.pos, size, size)
    }

    /// Move the ball so its hit-box matches `rect`
    pub fn set_rect(&mut self, rect: Rect) {
        self.pos = rect.center();
    }

    /// Advance one tick; attached balls only move with the paddle
    pub fn advance(&mut self) {
        if !self.attached {
            self.pos += self.vel;
        }
    }

    /// Undo the last displacement
    pub fn back_out(&mut self) {
        self.pos -= self.vel;
    }

    /// Mirrored copy used by the Split bonus
    pub fn mirrored(&self, id: u32) -> Self {
        Self {
            id,
            pos: self.pos,
            vel: IVec2::new(-self.vel.x, self.vel.y),
            attached: self.attached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ball_starts_attached() {
        let ball = Ball::new(1);
        assert!(ball.attached);
        assert_eq!(ball.vel, IVec2::new(6, 6));
    }

    #[test]
    fn test_attached_ball_does_not_move() {
        let mut ball = Ball::new(1);
        let start = ball.pos;
        ball.advance();
        assert_eq!(ball.pos, start);

        ball.attached = false;
        ball.advance();
        assert_eq!(ball.pos, start + ball.vel);
        ball.back_out();
        assert_eq!(ball.pos, start);
    }

    #[test]
    fn test_tiny_archetype_shrinks_hitbox() {
        let ball = Ball::new(1);
        let mut archetype = BallArchetype::default();
        assert_eq!(ball.rect(&archetype).w, BALL_SIZE);
        archetype.tiny = true;
        assert_eq!(ball.rect(&archetype).w, TINY_BALL_SIZE);
        assert_eq!(ball.rect(&archetype).center(), ball.pos);
        archetype.reset();
        assert!(!archetype.tiny);
    }

    #[test]
    fn test_mirrored_negates_horizontal_speed() {
        let mut ball = Ball::new(1);
        ball.vel = IVec2::new(5, -7);
        ball.attached = false;
        let twin = ball.mirrored(2);
        assert_eq!(twin.vel, IVec2::new(-5, -7));
        assert_eq!(twin.pos, ball.pos);
        assert!(!twin.attached);
    }
}
