//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Elapsed time comes in with each tick, never from a clock
//! - Randomness comes from the state's seeded RNG only
//! - Side effects leave as `GameEvent`s
//! - No rendering, audio or file dependencies

pub mod collision;
pub mod cooldown;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    Body, BodyOutcome, CollisionResolution, WallBounce, bounce_off_walls, is_collision_free,
    resolve_pair,
};
pub use cooldown::{Cooldown, CooldownState};
pub use rect::{Bounds, Rect, integrate};
pub use state::{
    Burger, Cabbage, EntitySizes, Explosion, GameEvent, GamePhase, GameState, Projectile,
    ProjectileKind, WorldConfig,
};
pub use tick::{TickInput, tick};
