//! Cabbage spawning with collision-free placement
//!
//! Positions are rejection-sampled inside the spawn border until the new
//! cabbage overlaps nothing in play. Sampling is capped; when the field is
//! too crowded the last sample is used anyway.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::collision::is_collision_free;
use super::rect::{Bounds, Rect};
use super::state::{Cabbage, GameState, random_firing_delay};
use crate::consts::*;

/// Where a spawn candidate ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rect: Rect,
    /// Samples drawn, including the accepted one
    pub attempts: u32,
    /// False when the attempt cap ran out
    pub collision_free: bool,
}

/// `min + rand(range)`, or just `min` for an empty range
pub fn random_location(rng: &mut impl Rng, min: i32, range: i32) -> i32 {
    if range <= 0 {
        return min;
    }
    min + rng.random_range(0..range)
}

/// Random center inside the spawn border
pub fn random_spawn_center(rng: &mut impl Rng, bounds: Bounds) -> IVec2 {
    IVec2::new(
        random_location(rng, SPAWN_BORDER_SIZE, bounds.width - 2 * SPAWN_BORDER_SIZE),
        random_location(rng, SPAWN_BORDER_SIZE, bounds.height - 2 * SPAWN_BORDER_SIZE),
    )
}

/// Random cabbage velocity: speed in [min, min + range), any heading
pub fn random_cabbage_velocity(rng: &mut impl Rng) -> Vec2 {
    let speed = MIN_CABBAGE_SPEED + rng.random::<f32>() * CABBAGE_SPEED_RANGE;
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Sample a rectangle of `size` that overlaps none of `obstacles`
///
/// Gives up after `max_attempts` samples (at least one is always drawn) and
/// returns the last sample with `collision_free = false`.
pub fn place_without_collision(
    rng: &mut impl Rng,
    bounds: Bounds,
    size: IVec2,
    obstacles: &[Rect],
    max_attempts: u32,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut rect = Rect::centered_at(random_spawn_center(rng, bounds), size.x, size.y);
    let mut attempts = 1;

    loop {
        if is_collision_free(&rect, obstacles) {
            return Placement {
                rect,
                attempts,
                collision_free: true,
            };
        }
        if attempts >= max_attempts {
            return Placement {
                rect,
                attempts,
                collision_free: false,
            };
        }
        rect.set_center(random_spawn_center(rng, bounds));
        attempts += 1;
    }
}

/// Add one cabbage to the world at a collision-free spot
pub fn spawn_cabbage(state: &mut GameState) {
    let obstacles = state.collision_rects();
    let bounds = state.bounds();
    let size = state.sizes().cabbage;
    let max_attempts = state.config.spawn_max_attempts;

    let velocity = random_cabbage_velocity(&mut state.rng);
    let delay = random_firing_delay(&mut state.rng);
    let placement = place_without_collision(&mut state.rng, bounds, size, &obstacles, max_attempts);

    if placement.collision_free {
        log::debug!(
            "Spawned cabbage at {:?} after {} attempt(s)",
            placement.rect.center(),
            placement.attempts
        );
    } else {
        log::warn!(
            "No collision-free spot after {} attempts, spawning cabbage at {:?} anyway",
            placement.attempts,
            placement.rect.center()
        );
    }

    state
        .cabbages
        .push(Cabbage::new(placement.rect.center(), size, velocity, delay));
}
