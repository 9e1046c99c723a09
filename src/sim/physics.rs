//! Speed-vector and bounce-angle math shared by the collision responses
//!
//! Velocities are whole pixels per tick. Intermediate math runs in `f32`
//! and is rounded back at the end.

use std::f32::consts::FRAC_PI_2;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::MIN_BOUNCE_ANGLE;

/// Velocity component selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The x component (a side face or side wall was struck)
    Horizontal,
    /// The y component (a top/bottom face or the ceiling was struck)
    Vertical,
}

/// Negate one velocity component
#[inline]
pub fn reflect_axis(vel: IVec2, axis: Axis) -> IVec2 {
    match axis {
        Axis::Horizontal => IVec2::new(-vel.x, vel.y),
        Axis::Vertical => IVec2::new(vel.x, -vel.y),
    }
}

/// Euclidean speed of an integer velocity
#[inline]
pub fn speed(vel: IVec2) -> f32 {
    vel.as_vec2().length()
}

/// Rescale `vel` to `min(cap, |vel| + increment)`, keeping its direction
pub fn speed_up(vel: Vec2, increment: f32, cap: f32) -> Vec2 {
    let target = (vel.length() + increment).min(cap);
    vel.normalize_or_zero() * target
}

/// Launch angle (radians from +x, measured upward) for a ball leaving the paddle
///
/// Dead center gives pi/2. The result never falls within `MIN_BOUNCE_ANGLE`
/// of vertical or of horizontal.
pub fn angle_from_paddle_contact(ball_x: f32, paddle_x: f32, paddle_width: f32) -> f32 {
    let alpha = -std::f32::consts::PI * (ball_x - paddle_x) / paddle_width + FRAC_PI_2;
    clamp_bounce_angle(alpha)
}

/// Sign-preserving clamp of `alpha` into `[MIN_BOUNCE_ANGLE, pi - MIN_BOUNCE_ANGLE]`
/// with the near-vertical cone removed
pub fn clamp_bounce_angle(alpha: f32) -> f32 {
    let offset = alpha - FRAC_PI_2;
    if offset.abs() < MIN_BOUNCE_ANGLE {
        FRAC_PI_2 + MIN_BOUNCE_ANGLE.copysign(offset)
    } else if offset.abs() > FRAC_PI_2 - MIN_BOUNCE_ANGLE {
        FRAC_PI_2 + (FRAC_PI_2 - MIN_BOUNCE_ANGLE).copysign(offset)
    } else {
        alpha
    }
}

/// Integer velocity for `speed` along `alpha` (upward is negative y)
///
/// Rounds each component; falls back to truncation when rounding would
/// push the magnitude past `cap`.
pub fn velocity_from_angle(speed: f32, alpha: f32, cap: f32) -> IVec2 {
    let x = speed * alpha.cos();
    let y = -speed * alpha.sin();
    let rounded = IVec2::new(x.round() as i32, y.round() as i32);
    if self::speed(rounded) <= cap {
        rounded
    } else {
        IVec2::new(x.trunc() as i32, y.trunc() as i32)
    }
}

/// Scale an integer velocity to exactly `cap` (components truncated)
pub fn renormalize(vel: IVec2, cap: f32) -> IVec2 {
    let v = vel.as_vec2();
    let len = v.length();
    if len <= f32::EPSILON {
        return vel;
    }
    let scaled = v * (cap / len);
    IVec2::new(scaled.x.trunc() as i32, scaled.y.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_reflect_axis() {
        let v = IVec2::new(-4, -3);
        assert_eq!(reflect_axis(v, Axis::Horizontal), IVec2::new(4, -3));
        assert_eq!(reflect_axis(v, Axis::Vertical), IVec2::new(-4, 3));
    }

    #[test]
    fn test_speed_up_respects_cap() {
        let v = speed_up(Vec2::new(3.0, 4.0), 0.5, 20.0);
        assert!((v.length() - 5.5).abs() < 1e-4);
        let v = speed_up(Vec2::new(12.0, 16.0), 0.5, 20.0);
        assert!((v.length() - 20.0).abs() < 1e-4);
        // Direction is preserved
        assert!((v.x / v.y - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_dead_center_is_pushed_off_vertical() {
        let alpha = angle_from_paddle_contact(320.0, 320.0, 144.0);
        assert!((alpha - (PI / 2.0 + MIN_BOUNCE_ANGLE)).abs() < 1e-5);
    }

    #[test]
    fn test_edge_contact_is_not_grazing() {
        // Far left of the paddle would be almost horizontal without the clamp
        let alpha = angle_from_paddle_contact(248.0, 320.0, 144.0);
        assert!(alpha <= PI - MIN_BOUNCE_ANGLE + 1e-5);
        let alpha = angle_from_paddle_contact(400.0, 320.0, 144.0);
        assert!(alpha >= MIN_BOUNCE_ANGLE - 1e-5);
    }

    #[test]
    fn test_velocity_from_angle_goes_up() {
        let v = velocity_from_angle(10.0, PI / 2.0, 20.0);
        assert_eq!(v, IVec2::new(0, -10));
        let v = velocity_from_angle(20.0, PI / 4.0, 20.0);
        assert!(v.y < 0 && v.x > 0);
        assert!(speed(v) <= 20.0);
    }

    #[test]
    fn test_velocity_from_angle_truncates_over_cap() {
        // Components are about (-12.6, -15.5); rounding gives (-13, -16), over 20
        let alpha = (15.53f32).atan2(-12.6);
        let v = velocity_from_angle(20.0, alpha, 20.0);
        assert!(speed(v) <= 20.0);
        assert!(v.x < 0 && v.y < 0);
    }

    #[test]
    fn test_renormalize() {
        let v = renormalize(IVec2::new(3, 4), 20.0);
        assert_eq!(v, IVec2::new(12, 16));
        assert_eq!(renormalize(IVec2::ZERO, 20.0), IVec2::ZERO);
    }
}
