//! Ball-Z - a breakout arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, bonuses, screen state machine)
//! - `persistence`: Level definitions and ranking storage
//! - `platform`: Input event abstraction
//! - `view`: Per-frame visual snapshot for an external renderer
//! - `settings`: JSON-backed configuration

pub mod audio;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod ranking;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{GameError, LevelError, PersistenceError};
pub use ranking::Ranking;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 1040;
    pub const SCREEN_HEIGHT: i32 = 800;
    /// Side margin; the top wall sits at 2 * MARGIN, tiles start at 3 * MARGIN
    pub const MARGIN: i32 = 40;

    /// Simulation rate (one tick per rendered frame)
    pub const FRAME_RATE: u32 = 60;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 16;
    pub const TINY_BALL_SIZE: i32 = 8;
    pub const BALL_MAX_SPEED: f32 = 20.0;
    /// Speed gained on every paddle bounce
    pub const PADDLE_SPEED_INCREMENT: f32 = 0.33;
    /// Half-width of the forbidden cones around vertical and horizontal (15 degrees)
    pub const MIN_BOUNCE_ANGLE: f32 = PI / 12.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: i32 = 20;
    /// Widths for length levels -2..=2
    pub const PADDLE_WIDTHS: [i32; 5] = [36, 72, 144, 288, 576];
    pub const PADDLE_MIN_LEVEL: i8 = -2;
    pub const PADDLE_MAX_LEVEL: i8 = 2;

    /// Tile grid
    pub const TILE_WIDTH: i32 = 60;
    pub const TILE_HEIGHT: i32 = 30;
    pub const GRID_COLS: usize = 16;
    pub const GRID_ROWS: usize = 16;
    /// |SLOPE * dy| <= |dx| means the ball struck a side face
    pub const TILE_FACE_SLOPE: f32 = 1.8;

    /// Bonus drops
    pub const BONUS_SIZE: i32 = 30;
    pub const BONUS_MIN_FALL_SPEED: i32 = 4;
    pub const BONUS_MAX_FALL_SPEED: i32 = 8;
    pub const DEFAULT_BONUS_CHANCE: f64 = 0.1;

    /// Scoring
    pub const TILE_POINTS: u32 = 5;
    pub const BLAST_POINTS: u32 = 10;
    pub const BONUS_POINTS: u32 = 100;
    pub const LIFE_CAP_POINTS: u64 = 900;
    pub const LEVEL_POINTS: u64 = 1000;

    /// Lives
    pub const STARTING_LIVES: i32 = 2;
    pub const MAX_LIVES: i32 = 4;

    /// Explosion animation: 6 frames over 250 ms
    pub const EXPLOSION_FRAMES: u32 = 6;
    pub const EXPLOSION_TICKS: u32 = 15;
}
