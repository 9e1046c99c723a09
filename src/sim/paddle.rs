//! The player's paddle

use std::collections::BTreeSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Discrete length in `PADDLE_MIN_LEVEL..=PADDLE_MAX_LEVEL`
    pub length_level: i8,
    /// Ids of the balls resting on the paddle (the level owns the balls)
    pub attached: BTreeSet<u32>,
    /// Captures balls on contact instead of deflecting them
    pub is_magnetic: bool,
    /// Horizontal input is inverted
    pub is_confused: bool,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::from_center(
                IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - MARGIN),
                width_for_level(0),
                PADDLE_HEIGHT,
            ),
            length_level: 0,
            attached: BTreeSet::new(),
            is_magnetic: false,
            is_confused: false,
        }
    }
}

/// Pixel width for a length level (clamped into range)
pub fn width_for_level(level: i8) -> i32 {
    let level = level.clamp(PADDLE_MIN_LEVEL, PADDLE_MAX_LEVEL);
    PADDLE_WIDTHS[(level - PADDLE_MIN_LEVEL) as usize]
}

impl Paddle {
    #[inline]
    pub fn width(&self) -> i32 {
        self.rect.w
    }

    /// Slide horizontally by `dx` (inverted when confused), stopping at the margins.
    ///
    /// Returns the displacement actually applied, which attached balls must follow.
    pub fn slide(&mut self, dx: i32) -> i32 {
        let dx = if self.is_confused { -dx } else { dx };
        let before = self.rect.left();
        self.rect.translate(IVec2::new(dx, 0));

        if self.rect.left() <= MARGIN {
            self.rect.set_left(MARGIN);
        } else if self.rect.right() >= SCREEN_WIDTH - MARGIN {
            self.rect.set_right(SCREEN_WIDTH - MARGIN);
        }
        self.rect.left() - before
    }

    /// Change the length level, keeping the paddle centered where it is
    pub fn resize(&mut self, level: i8) {
        self.length_level = level.clamp(PADDLE_MIN_LEVEL, PADDLE_MAX_LEVEL);
        self.rect = self.rect.resized(width_for_level(self.length_level), PADDLE_HEIGHT);
    }

    pub fn attach(&mut self, ball_id: u32) {
        self.attached.insert(ball_id);
    }

    pub fn detach(&mut self, ball_id: u32) {
        self.attached.remove(&ball_id);
    }

    pub fn is_holding(&self, ball_id: u32) -> bool {
        self.attached.contains(&ball_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paddle() {
        let paddle = Paddle::default();
        assert_eq!(paddle.width(), 144);
        assert_eq!(paddle.rect.center(), IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - MARGIN));
        assert!(!paddle.is_magnetic);
        assert!(!paddle.is_confused);
    }

    #[test]
    fn test_slide_and_confusion() {
        let mut paddle = Paddle::default();
        let x0 = paddle.rect.x;
        assert_eq!(paddle.slide(10), 10);
        assert_eq!(paddle.rect.x, x0 + 10);

        paddle.is_confused = true;
        assert_eq!(paddle.slide(10), -10);
        assert_eq!(paddle.rect.x, x0);
    }

    #[test]
    fn test_slide_stops_at_margins() {
        let mut paddle = Paddle::default();
        let applied = paddle.slide(-10_000);
        assert_eq!(paddle.rect.left(), MARGIN);
        assert_eq!(applied, MARGIN - (SCREEN_WIDTH / 2 - 72));

        paddle.slide(10_000);
        assert_eq!(paddle.rect.right(), SCREEN_WIDTH - MARGIN);
    }

    #[test]
    fn test_resize_clamps_and_preserves_center() {
        let mut paddle = Paddle::default();
        let center = paddle.rect.center();
        paddle.resize(5);
        assert_eq!(paddle.length_level, 2);
        assert_eq!(paddle.width(), 576);
        assert_eq!(paddle.rect.center(), center);
        paddle.resize(-5);
        assert_eq!(paddle.length_level, -2);
        assert_eq!(paddle.width(), 36);
    }
}
