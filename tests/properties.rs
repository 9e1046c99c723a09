//! Property tests for the numeric invariants of the physics

use std::f32::consts::PI;

use ballz::consts::*;
use ballz::ranking::{MAX_ENTRIES, Ranking};
use ballz::sim::ball::{Ball, BallArchetype};
use ballz::sim::collision::{ball_tile, deflect, resolve_walls};
use ballz::sim::paddle::Paddle;
use ballz::sim::physics::{angle_from_paddle_contact, speed};
use ballz::sim::tile::{GridPos, Tile, TileKind};
use glam::IVec2;
use proptest::prelude::*;

fn free_ball(pos: IVec2, vel: IVec2) -> Ball {
    let mut ball = Ball::new(1);
    ball.attached = false;
    ball.pos = pos;
    ball.vel = vel;
    ball
}

proptest! {
    #[test]
    fn paddle_bounce_never_exceeds_max_speed(
        vx in -14i32..=14,
        vy in 4i32..=14,
        offset in -80i32..=80,
        length in PADDLE_MIN_LEVEL..=PADDLE_MAX_LEVEL,
    ) {
        let mut paddle = Paddle::default();
        paddle.resize(length);
        let arch = BallArchetype::default();
        let center = paddle.rect.center();
        let mut ball = free_ball(IVec2::new(center.x + offset, paddle.rect.top()), IVec2::new(vx, vy));

        deflect(&mut ball, &mut paddle, &arch);

        prop_assert!(speed(ball.vel) <= BALL_MAX_SPEED);
        prop_assert!(ball.vel.y < 0);
        prop_assert!(!ball.attached);
        prop_assert_eq!(ball.rect(&arch).bottom(), paddle.rect.top() - 1);
    }

    #[test]
    fn bounce_angle_stays_out_of_forbidden_cones(
        ball_x in -2000.0f32..2000.0,
        paddle_x in 0.0f32..1040.0,
        width in prop::sample::select(PADDLE_WIDTHS.to_vec()),
    ) {
        let alpha = angle_from_paddle_contact(ball_x, paddle_x, width as f32);
        let eps = 1e-4;
        prop_assert!(alpha >= MIN_BOUNCE_ANGLE - eps);
        prop_assert!(alpha <= PI - MIN_BOUNCE_ANGLE + eps);
        prop_assert!((alpha - PI / 2.0).abs() >= MIN_BOUNCE_ANGLE - eps);
    }

    #[test]
    fn walls_contain_the_ball(
        x in (MARGIN + 8)..(SCREEN_WIDTH - MARGIN - 8),
        y in (2 * MARGIN + 8)..SCREEN_HEIGHT,
        vx in -14i32..=14,
        vy in -14i32..=14,
        tiny in any::<bool>(),
    ) {
        let arch = BallArchetype { tiny, ..BallArchetype::default() };
        let mut ball = free_ball(IVec2::new(x, y), IVec2::new(vx, vy));
        let before = speed(ball.vel);
        ball.advance();
        let contact = resolve_walls(&mut ball, &arch);

        let rect = ball.rect(&arch);
        prop_assert!(!contact.lost);
        prop_assert!(rect.left() >= MARGIN);
        prop_assert!(rect.right() <= SCREEN_WIDTH - MARGIN);
        prop_assert!(rect.top() >= 2 * MARGIN);
        prop_assert!((speed(ball.vel) - before).abs() < 1e-4);
    }

    #[test]
    fn tile_reflection_keeps_speed(
        dx in -40i32..=40,
        dy in -25i32..=25,
        vx in -14i32..=14,
        vy in -14i32..=14,
    ) {
        let arch = BallArchetype::default();
        let tile = Tile::new(1, TileKind::Regular, GridPos::new(6, 6).unwrap());
        let mut ball = free_ball(tile.rect.center() + IVec2::new(dx, dy), IVec2::new(vx, vy));
        let before = ball.vel;

        let contact = ball_tile(&mut ball, &tile, &arch);

        prop_assert!(contact.reflected.is_some());
        prop_assert_eq!(ball.vel.abs(), before.abs());
        prop_assert!(ball.vel.x == -before.x || ball.vel.y == -before.y);
    }

    #[test]
    fn ranking_stays_sorted_and_capped(scores in prop::collection::vec(0u64..10_000, 0..30)) {
        let mut ranking = Ranking::new();
        for (i, score) in scores.iter().enumerate() {
            ranking.insert(&format!("p{i}"), *score);
        }
        prop_assert!(ranking.len() <= MAX_ENTRIES);
        prop_assert!(ranking.entries.windows(2).all(|w| w[0].score >= w[1].score));

        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(MAX_ENTRIES);
        let kept: Vec<u64> = ranking.entries.iter().map(|e| e.score).collect();
        prop_assert_eq!(kept, sorted);
    }
}
