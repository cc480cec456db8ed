//! Game state and core simulation types
//!
//! Every collection is owned by [`GameState`]; entities never reach for
//! shared lists. Emitters push new projectiles into the list they are handed
//! and report side effects as [`GameEvent`]s.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::bounce_off_walls;
use super::cooldown::Cooldown;
use super::rect::{Bounds, Rect, integrate};
use crate::consts::*;
use crate::platform::input::KeyEdge;

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the play trigger
    MainMenu,
    /// Active gameplay
    Playing,
    /// Frozen; only the pause key is watched
    Paused,
    /// Run ended; score gets persisted on the next tick
    Result,
}

/// Something the simulation wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// A cabbage hit a wall or another cabbage
    CabbageBounced,
    CabbageShot,
    BurgerShot,
    KetchupPlanted,
    ExplosionStarted,
    BurgerDamaged { health: i32 },
    BurgerDied,
    CabbageDestroyed { score: u32 },
    /// The run is over; persist this score
    RunFinished { score: u32 },
    QuitRequested,
}

/// Projectile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    /// French fries fired by the burger
    PlayerShot,
    /// Fired by a cabbage
    EnemyShot,
    /// Stationary ketchup planted by the burger
    PlantedItem,
}

impl ProjectileKind {
    /// Whether touching the burger hurts it
    pub fn hurts_burger(self) -> bool {
        match self {
            ProjectileKind::EnemyShot => true,
            ProjectileKind::PlayerShot | ProjectileKind::PlantedItem => false,
        }
    }

    /// Whether touching a cabbage destroys it
    pub fn hurts_cabbages(self) -> bool {
        match self {
            ProjectileKind::PlayerShot | ProjectileKind::PlantedItem => true,
            ProjectileKind::EnemyShot => false,
        }
    }
}

/// Sprite sizes used to build entity rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySizes {
    pub burger: IVec2,
    pub cabbage: IVec2,
    pub french_fries: IVec2,
    pub cabbage_shot: IVec2,
    pub ketchup: IVec2,
    /// One frame of the explosion sheet
    pub explosion_frame: IVec2,
}

impl EntitySizes {
    pub fn projectile(&self, kind: ProjectileKind) -> IVec2 {
        match kind {
            ProjectileKind::PlayerShot => self.french_fries,
            ProjectileKind::EnemyShot => self.cabbage_shot,
            ProjectileKind::PlantedItem => self.ketchup,
        }
    }
}

impl Default for EntitySizes {
    fn default() -> Self {
        Self {
            burger: IVec2::new(64, 48),
            cabbage: IVec2::new(48, 48),
            french_fries: IVec2::new(8, 24),
            cabbage_shot: IVec2::new(12, 12),
            ketchup: IVec2::new(16, 24),
            explosion_frame: IVec2::new(64, 64),
        }
    }
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub velocity: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Projectile centered on `center` moving vertically at `y_velocity`
    pub fn new(kind: ProjectileKind, center: IVec2, size: IVec2, y_velocity: f32) -> Self {
        Self {
            kind,
            rect: Rect::centered_at(center, size.x, size.y),
            velocity: Vec2::new(0.0, y_velocity),
            active: true,
        }
    }

    /// Move, and deactivate once fully off-screen vertically
    pub fn update(&mut self, dt_ms: u32, bounds: Bounds) {
        self.rect = integrate(self.rect, self.velocity, dt_ms);
        if self.rect.bottom() < 0 || self.rect.top() > bounds.height {
            self.active = false;
        }
    }
}

/// A roaming cabbage
#[derive(Debug, Clone, PartialEq)]
pub struct Cabbage {
    pub rect: Rect,
    pub velocity: Vec2,
    pub active: bool,
    /// Time until the next automatic shot
    pub fire: Cooldown,
}

impl Cabbage {
    pub fn new(center: IVec2, size: IVec2, velocity: Vec2, firing_delay_ms: u32) -> Self {
        Self {
            rect: Rect::centered_at(center, size.x, size.y),
            velocity,
            active: true,
            fire: Cooldown::cooling(firing_delay_ms),
        }
    }

    /// Move, bounce off walls, and fire when the timer runs out
    pub fn update(
        &mut self,
        dt_ms: u32,
        bounds: Bounds,
        sizes: &EntitySizes,
        rng: &mut impl Rng,
        projectiles: &mut Vec<Projectile>,
        events: &mut Vec<GameEvent>,
    ) {
        let moved = integrate(self.rect, self.velocity, dt_ms);
        let bounce = bounce_off_walls(moved, self.velocity, bounds);
        self.rect = bounce.rect;
        self.velocity = bounce.velocity;
        if bounce.bounced {
            events.push(GameEvent::CabbageBounced);
        }

        self.fire.advance(dt_ms, false);
        if self.fire.is_ready() && self.fire.trigger_with(random_firing_delay(rng)) {
            let center = self.rect.center() + IVec2::new(0, RED_CABBAGE_PROJECTILE_OFFSET);
            projectiles.push(Projectile::new(
                ProjectileKind::EnemyShot,
                center,
                sizes.projectile(ProjectileKind::EnemyShot),
                self.projectile_y_velocity(),
            ));
            events.push(GameEvent::CabbageShot);
        }
    }

    /// Shots inherit downward motion so they never trail their shooter
    pub fn projectile_y_velocity(&self) -> f32 {
        if self.velocity.y > 0.0 {
            self.velocity.y + RED_CABBAGE_PROJECTILE_SPEED
        } else {
            RED_CABBAGE_PROJECTILE_SPEED
        }
    }
}

/// Random delay between cabbage shots
pub fn random_firing_delay(rng: &mut impl Rng) -> u32 {
    CABBAGE_MIN_FIRING_DELAY + rng.random_range(0..CABBAGE_FIRING_RATE_RANGE)
}

/// The player's burger
#[derive(Debug, Clone, PartialEq)]
pub struct Burger {
    pub rect: Rect,
    health: i32,
    pub shoot: Cooldown,
    pub plant: Cooldown,
    /// Ketchups left to plant
    pub ketchups: u32,
    /// Time spent waiting for a ketchup refill (only while empty)
    pub ketchup_refill_ms: u32,
}

impl Burger {
    pub fn new(center: IVec2, size: IVec2) -> Self {
        Self {
            rect: Rect::centered_at(center, size.x, size.y),
            health: BURGER_INITIAL_HEALTH,
            shoot: Cooldown::new(BURGER_COOLDOWN_MILLISECONDS),
            plant: Cooldown::new(KETCHUP_COOLDOWN_MILLISECONDS),
            ketchups: TOTAL_KETCHUP_NUMBER,
            ketchup_refill_ms: 0,
        }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Set health, clamped to [0, 100]
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, BURGER_MAX_HEALTH);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.set_health(self.health.saturating_sub(amount));
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move the center by whole pixels, staying inside the window
    pub fn move_by(&mut self, delta: IVec2, bounds: Bounds) {
        self.rect = bounds.clamp(self.rect.translated(delta.x, delta.y));
    }

    /// Count down the ketchup refill while the bottle is empty
    pub fn advance_ketchup_refill(&mut self, dt_ms: u32) {
        if self.ketchups > 0 {
            return;
        }
        self.ketchup_refill_ms = self.ketchup_refill_ms.saturating_add(dt_ms);
        if self.ketchup_refill_ms >= KETCHUP_TIME {
            self.ketchup_refill_ms = 0;
            self.ketchups = TOTAL_KETCHUP_NUMBER;
        }
    }
}

/// A one-shot explosion animation
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    /// Destination rect of one animation frame
    pub rect: Rect,
    pub frame: u32,
    elapsed_frame_ms: u32,
    pub finished: bool,
}

impl Explosion {
    pub fn new(center: IVec2, frame_size: IVec2) -> Self {
        Self {
            rect: Rect::centered_at(center, frame_size.x, frame_size.y),
            frame: 0,
            elapsed_frame_ms: 0,
            finished: false,
        }
    }

    pub fn update(&mut self, dt_ms: u32) {
        if self.finished {
            return;
        }
        self.elapsed_frame_ms = self.elapsed_frame_ms.saturating_add(dt_ms);
        if self.elapsed_frame_ms >= EXPLOSION_FRAME_TIME {
            self.elapsed_frame_ms = 0;
            if self.frame + 1 < EXPLOSION_NUM_FRAMES {
                self.frame += 1;
            } else {
                self.finished = true;
            }
        }
    }

    /// Source rectangle of the current frame within the sprite sheet
    pub fn source_rect(&self) -> Rect {
        let frame = self.frame as i32;
        let col = frame % EXPLOSION_FRAMES_PER_ROW;
        let row = frame / EXPLOSION_FRAMES_PER_ROW;
        Rect::new(
            col * self.rect.width,
            row * self.rect.height,
            self.rect.width,
            self.rect.height,
        )
    }
}

/// World parameters fixed for the lifetime of a [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub bounds: Bounds,
    pub max_enemies: usize,
    pub spawn_max_attempts: u32,
    pub seed: u64,
    pub sizes: EntitySizes,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            max_enemies: MAX_ENEMIES,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,
            seed: 0,
            sizes: EntitySizes::default(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: WorldConfig,
    pub phase: GamePhase,
    pub burger: Burger,
    pub cabbages: Vec<Cabbage>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Set once when health hits zero so death fires exactly once
    pub burger_dead: bool,
    /// Pause key debounce
    pub pause_key: KeyEdge,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Build a fresh world in the main menu with a full cabbage population
    pub fn new(config: WorldConfig) -> Self {
        let mut state = Self {
            config,
            phase: GamePhase::MainMenu,
            burger: Self::starting_burger(&config),
            cabbages: Vec::with_capacity(config.max_enemies),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            burger_dead: false,
            pause_key: KeyEdge::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
        };
        state.refill_cabbages();
        state
    }

    fn starting_burger(config: &WorldConfig) -> Burger {
        let bounds = config.bounds;
        let center = IVec2::new(bounds.width / 2, bounds.height - bounds.height / 8);
        Burger::new(center, config.sizes.burger)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    #[inline]
    pub fn sizes(&self) -> &EntitySizes {
        &self.config.sizes
    }

    /// Start a new run: fresh burger, empty field, zero score
    pub fn reset_run(&mut self) {
        self.burger = Self::starting_burger(&self.config);
        self.cabbages.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.score = 0;
        self.burger_dead = false;
        self.refill_cabbages();
        log::info!("New run started ({} cabbages)", self.cabbages.len());
    }

    /// Spawn cabbages until the population is back at `max_enemies`
    pub fn refill_cabbages(&mut self) {
        while self.cabbages.len() < self.config.max_enemies {
            super::spawn::spawn_cabbage(self);
        }
    }

    /// Every rectangle a new cabbage must avoid
    pub fn collision_rects(&self) -> Vec<Rect> {
        std::iter::once(self.burger.rect)
            .chain(self.cabbages.iter().map(|c| c.rect))
            .chain(self.projectiles.iter().map(|p| p.rect))
            .chain(self.explosions.iter().map(|e| e.rect))
            .collect()
    }

    /// Drop inactive entities; runs once at the end of a tick
    pub fn sweep(&mut self) {
        self.cabbages.retain(|c| c.active);
        self.projectiles.retain(|p| p.active);
        self.explosions.retain(|e| !e.finished);
    }
}
