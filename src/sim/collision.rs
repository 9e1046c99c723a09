//! Collision detection and response for balls against walls, paddle and tiles
//!
//! Everything is axis-aligned: overlaps are rectangle tests, responses are
//! axis reflections. Instead of a swept test, a tile contact backs the ball
//! out by its last displacement and guesses the struck face from the
//! center-to-center direction.

use glam::IVec2;

use super::ball::{Ball, BallArchetype};
use super::paddle::Paddle;
use super::physics::{
    Axis, angle_from_paddle_contact, reflect_axis, speed_up, velocity_from_angle,
};
use super::tile::Tile;
use crate::consts::*;

/// Result of the wall pass for one ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// A side wall or the ceiling reflected the ball
    pub bounced: bool,
    /// The ball dropped out below the playfield
    pub lost: bool,
}

/// Clamp a moving ball inside the side walls and ceiling, reflecting the
/// matching axis, and flag it lost once it falls past the bottom.
pub fn resolve_walls(ball: &mut Ball, archetype: &BallArchetype) -> WallContact {
    let mut contact = WallContact::default();
    if ball.attached {
        return contact;
    }

    let mut rect = ball.rect(archetype);

    if rect.left() <= MARGIN {
        rect.set_left(MARGIN);
        if ball.vel.x < 0 {
            ball.vel = reflect_axis(ball.vel, Axis::Horizontal);
            contact.bounced = true;
        }
    } else if rect.right() >= SCREEN_WIDTH - MARGIN {
        rect.set_right(SCREEN_WIDTH - MARGIN);
        if ball.vel.x > 0 {
            ball.vel = reflect_axis(ball.vel, Axis::Horizontal);
            contact.bounced = true;
        }
    }

    if rect.top() <= 2 * MARGIN {
        rect.set_top(2 * MARGIN);
        if ball.vel.y < 0 {
            ball.vel = reflect_axis(ball.vel, Axis::Vertical);
            contact.bounced = true;
        }
    } else if rect.top() > SCREEN_HEIGHT + MARGIN {
        contact.lost = true;
    }

    ball.set_rect(rect);
    contact
}

/// Push a ball back inside the side walls and ceiling without touching its
/// velocity. Backing out of a contact can undo the wall clamp of the same tick.
pub fn clamp_to_walls(ball: &mut Ball, archetype: &BallArchetype) {
    let mut rect = ball.rect(archetype);
    if rect.left() < MARGIN {
        rect.set_left(MARGIN);
    } else if rect.right() > SCREEN_WIDTH - MARGIN {
        rect.set_right(SCREEN_WIDTH - MARGIN);
    }
    if rect.top() < 2 * MARGIN {
        rect.set_top(2 * MARGIN);
    }
    ball.set_rect(rect);
}

/// What happened when a ball met the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleContact {
    /// Magnetic paddle caught the ball
    Captured,
    /// Ball bounced (or was launched) off the paddle
    Deflected,
}

/// Resolve a ball touching the paddle.
///
/// A free ball hitting a magnetic paddle is caught and rests on top of it.
/// Anything else leaves the paddle at an angle set by where it struck.
pub fn ball_paddle(ball: &mut Ball, paddle: &mut Paddle, archetype: &BallArchetype) -> PaddleContact {
    if !ball.attached && paddle.is_magnetic {
        let mut rect = ball.rect(archetype);
        rect.set_bottom(paddle.rect.top() - 1);
        ball.set_rect(rect);
        ball.attached = true;
        paddle.attach(ball.id);
        PaddleContact::Captured
    } else {
        deflect(ball, paddle, archetype);
        PaddleContact::Deflected
    }
}

/// Send a ball off the paddle. Also used to launch attached balls.
pub fn deflect(ball: &mut Ball, paddle: &mut Paddle, archetype: &BallArchetype) {
    if !ball.attached {
        ball.back_out();
        clamp_to_walls(ball, archetype);
    }
    ball.attached = false;
    paddle.detach(ball.id);

    let alpha = angle_from_paddle_contact(
        ball.pos.x as f32,
        paddle.rect.center().x as f32,
        paddle.width() as f32,
    );
    let speed = speed_up(ball.vel.as_vec2(), PADDLE_SPEED_INCREMENT, BALL_MAX_SPEED).length();
    ball.vel = velocity_from_angle(speed, alpha, BALL_MAX_SPEED);

    let mut rect = ball.rect(archetype);
    rect.set_bottom(paddle.rect.top() - 1);
    ball.set_rect(rect);
}

/// Which velocity component a tile contact reflects.
///
/// `(dx, dy)` runs from the tile center to the ball center; a mostly
/// horizontal offset means a side face was struck.
pub fn reflection_axis(ball_center: IVec2, tile_center: IVec2) -> Axis {
    let d = (ball_center - tile_center).as_vec2();
    if (TILE_FACE_SLOPE * d.y).abs() <= d.x.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// What the level must do to a tile after a ball touched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    /// Run the tile's own hit state machine
    Hit,
    /// Destroy outright and blast its cell (fiery ball)
    Burn,
}

/// Ball-side response to touching a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileContact {
    pub reflected: Option<Axis>,
    pub action: TileAction,
}

/// Resolve a ball touching `tile`; the tile itself is left to the caller.
///
/// Bullets keep their course. Everything else backs out of the overlap and
/// reflects unless the tile is cracked glass. Fiery balls still bounce.
pub fn ball_tile(ball: &mut Ball, tile: &Tile, archetype: &BallArchetype) -> TileContact {
    let mut reflected = None;
    if !archetype.bullet {
        ball.back_out();
        clamp_to_walls(ball, archetype);
        if !tile.is_softened() {
            let axis = reflection_axis(ball.pos, tile.rect.center());
            ball.vel = reflect_axis(ball.vel, axis);
            reflected = Some(axis);
        }
    }

    let action = if archetype.fiery {
        TileAction::Burn
    } else {
        TileAction::Hit
    };
    TileContact { reflected, action }
}
