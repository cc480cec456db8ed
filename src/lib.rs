//! Burger Blast - a burger versus a field of wall-bouncing cabbages
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion, collisions, game phases)
//! - `game`: Orchestrator binding the simulation to its collaborators
//! - `renderer`: Content loading and the read-only draw pass
//! - `audio`: Sound effect triggers
//! - `platform`: Input snapshot and key edge detection
//! - `persistence`: JSON file load/save
//! - `highscores`: Persisted leaderboard
//! - `settings`: User configuration

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Flow, Game};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default window resolution
    pub const WINDOW_WIDTH: i32 = 800;
    pub const WINDOW_HEIGHT: i32 = 600;

    /// Cabbage projectile (pixels/ms, damage, spawn offset below center)
    pub const RED_CABBAGE_PROJECTILE_SPEED: f32 = 0.3;
    pub const RED_CABBAGE_PROJECTILE_DAMAGE: i32 = 5;
    pub const RED_CABBAGE_PROJECTILE_OFFSET: i32 = 20;

    /// French fries projectile (pixels/ms, spawn offset above center)
    pub const FRENCH_FRIES_PROJECTILE_SPEED: f32 = 0.4;
    pub const FRENCH_FRIES_PROJECTILE_OFFSET: i32 = 10;

    /// Cabbage population kept alive during play
    pub const MAX_ENEMIES: usize = 5;

    /// Cabbage characteristics
    pub const CABBAGE_POINTS: u32 = 10;
    pub const CABBAGE_DAMAGE: i32 = 10;
    pub const MIN_CABBAGE_SPEED: f32 = 0.1;
    pub const CABBAGE_SPEED_RANGE: f32 = 0.2;
    pub const CABBAGE_MIN_FIRING_DELAY: u32 = 500;
    pub const CABBAGE_FIRING_RATE_RANGE: u32 = 1000;

    /// Burger characteristics
    pub const BURGER_INITIAL_HEALTH: i32 = 100;
    pub const BURGER_MAX_HEALTH: i32 = 100;
    /// Pixels per tick, not time-scaled
    pub const BURGER_MOVEMENT_AMOUNT: i32 = 10;
    pub const BURGER_COOLDOWN_MILLISECONDS: u32 = 3500;

    /// Explosion sprite sheet layout (3x3 frames)
    pub const EXPLOSION_FRAMES_PER_ROW: i32 = 3;
    pub const EXPLOSION_NUM_ROWS: i32 = 3;
    pub const EXPLOSION_NUM_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_TIME: u32 = 10;

    /// HUD placement
    pub const DISPLAY_OFFSET: i32 = 35;
    pub const SCORE_PREFIX: &str = "Score: ";
    pub const HEALTH_PREFIX: &str = "Health: ";

    /// Cabbages spawn at least this far from every window edge
    pub const SPAWN_BORDER_SIZE: i32 = 100;
    /// Default cap on spawn placement retries
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;

    /// Ketchup (planted item) support
    pub const KETCHUP_TIME: u32 = 120_000;
    pub const TOTAL_KETCHUP_NUMBER: u32 = 5;
    pub const KETCHUP_PROJECTILE_OFFSET: i32 = 15;
    pub const KETCHUP_COOLDOWN_MILLISECONDS: u32 = 6000;

    /// Default leaderboard capacity
    pub const MAX_NUMBER_OF_HIGHSCORES: usize = 5;
}
