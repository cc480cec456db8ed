//! Frame-stepped simulation tick
//!
//! One call advances the world by one rendered frame. Side effects (sounds,
//! persistence, quitting) come back as events for the caller to act on.

use glam::IVec2;

use super::collision::{Body, BodyOutcome, resolve_pair};
use super::state::{
    Burger, EntitySizes, Explosion, GameEvent, GamePhase, GameState, Projectile, ProjectileKind,
};
use super::rect::Bounds;
use crate::consts::*;
use crate::platform::input::{InputSnapshot, Key};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Milliseconds since the previous tick
    pub dt_ms: u32,
    pub input: InputSnapshot,
}

impl TickInput {
    pub fn new(dt_ms: u32, input: InputSnapshot) -> Self {
        Self { dt_ms, input }
    }

    fn wants_quit(&self) -> bool {
        self.input.quit || self.input.keys.contains(Key::Escape)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.wants_quit() {
        events.push(GameEvent::QuitRequested);
        return events;
    }

    match state.phase {
        GamePhase::MainMenu => {
            if input.input.play {
                if state.burger_dead {
                    state.reset_run();
                }
                set_phase(state, GamePhase::Playing, &mut events);
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;
            play_frame(state, input, &mut events);
        }

        GamePhase::Paused => {
            if state.pause_key.pressed(input.input.keys.contains(Key::Pause)) {
                set_phase(state, GamePhase::Playing, &mut events);
            }
        }

        GamePhase::Result => {
            events.push(GameEvent::RunFinished { score: state.score });
            set_phase(state, GamePhase::MainMenu, &mut events);
        }
    }

    events
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::info!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}

fn play_frame(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let dt = input.dt_ms;
    let bounds = state.bounds();
    let sizes = state.config.sizes;

    update_burger(
        &mut state.burger,
        &input.input,
        dt,
        bounds,
        &sizes,
        &mut state.projectiles,
        events,
    );

    if state.pause_key.pressed(input.input.keys.contains(Key::Pause)) {
        set_phase(state, GamePhase::Paused, events);
        return;
    }

    for cabbage in &mut state.cabbages {
        cabbage.update(dt, bounds, &sizes, &mut state.rng, &mut state.projectiles, events);
    }
    for projectile in &mut state.projectiles {
        projectile.update(dt, bounds);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }

    resolve_cabbage_pairs(state, dt, events);
    resolve_burger_cabbages(state, events);
    resolve_burger_projectiles(state, events);
    resolve_cabbage_projectiles(state, events);

    state.sweep();
    state.refill_cabbages();
}

/// Movement, cooldowns, shooting and planting for the burger
fn update_burger(
    burger: &mut Burger,
    input: &InputSnapshot,
    dt: u32,
    bounds: Bounds,
    sizes: &EntitySizes,
    projectiles: &mut Vec<Projectile>,
    events: &mut Vec<GameEvent>,
) {
    if !burger.is_alive() {
        return;
    }

    burger.move_by(input.keys.direction() * BURGER_MOVEMENT_AMOUNT, bounds);

    burger.shoot.advance(dt, input.mouse_left.is_released());
    burger.plant.advance(dt, input.mouse_right.is_released());

    if input.mouse_left.is_pressed() && burger.shoot.trigger() {
        let center = burger.rect.center() - IVec2::new(0, FRENCH_FRIES_PROJECTILE_OFFSET);
        projectiles.push(Projectile::new(
            ProjectileKind::PlayerShot,
            center,
            sizes.projectile(ProjectileKind::PlayerShot),
            -FRENCH_FRIES_PROJECTILE_SPEED,
        ));
        events.push(GameEvent::BurgerShot);
    }

    burger.advance_ketchup_refill(dt);

    if input.mouse_right.is_pressed() && burger.ketchups > 0 && burger.plant.trigger() {
        burger.ketchups -= 1;
        let center = burger.rect.center() - IVec2::new(0, KETCHUP_PROJECTILE_OFFSET);
        projectiles.push(Projectile::new(
            ProjectileKind::PlantedItem,
            center,
            sizes.projectile(ProjectileKind::PlantedItem),
            0.0,
        ));
        events.push(GameEvent::KetchupPlanted);
    }
}

/// Elastic bounces between cabbages, each pair once in list order
fn resolve_cabbage_pairs(state: &mut GameState, dt: u32, events: &mut Vec<GameEvent>) {
    let bounds = state.bounds();
    let cabbages = &mut state.cabbages;

    for i in 0..cabbages.len() {
        for j in (i + 1)..cabbages.len() {
            if !(cabbages[i].active && cabbages[j].active) {
                continue;
            }
            let first = Body::new(cabbages[i].rect, cabbages[i].velocity);
            let second = Body::new(cabbages[j].rect, cabbages[j].velocity);
            let Some(resolution) = resolve_pair(dt, bounds, first, second) else {
                continue;
            };

            events.push(GameEvent::CabbageBounced);
            for (idx, outcome) in [(i, resolution.first), (j, resolution.second)] {
                let cabbage = &mut cabbages[idx];
                match outcome {
                    BodyOutcome::Moved { rect, velocity } => {
                        cabbage.rect = rect;
                        cabbage.velocity = velocity;
                    }
                    BodyOutcome::OutOfBounds => cabbage.active = false,
                }
            }
        }
    }
}

fn add_explosion(state: &mut GameState, center: IVec2, events: &mut Vec<GameEvent>) {
    state
        .explosions
        .push(Explosion::new(center, state.config.sizes.explosion_frame));
    events.push(GameEvent::ExplosionStarted);
}

/// Flag the burger dead and end the run, once
fn check_burger_kill(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.burger.health() == 0 && !state.burger_dead {
        state.burger_dead = true;
        events.push(GameEvent::BurgerDied);
        set_phase(state, GamePhase::Result, events);
    }
}

fn damage_burger(state: &mut GameState, amount: i32, events: &mut Vec<GameEvent>) {
    state.burger.take_damage(amount);
    events.push(GameEvent::BurgerDamaged {
        health: state.burger.health(),
    });
    check_burger_kill(state, events);
}

/// Touching a cabbage destroys it and hurts the burger
fn resolve_burger_cabbages(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for i in 0..state.cabbages.len() {
        let cabbage = &state.cabbages[i];
        if !cabbage.active || !state.burger.rect.intersects(&cabbage.rect) {
            continue;
        }
        let center = cabbage.rect.center();
        state.cabbages[i].active = false;
        add_explosion(state, center, events);
        damage_burger(state, CABBAGE_DAMAGE, events);
    }
}

/// Enemy shots that reach the burger
fn resolve_burger_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for i in 0..state.projectiles.len() {
        let projectile = &state.projectiles[i];
        if !projectile.kind.hurts_burger()
            || !projectile.active
            || !state.burger.rect.intersects(&projectile.rect)
        {
            continue;
        }
        state.projectiles[i].active = false;
        damage_burger(state, RED_CABBAGE_PROJECTILE_DAMAGE, events);
    }
}

/// French fries and ketchup destroy cabbages
fn resolve_cabbage_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for i in 0..state.cabbages.len() {
        for j in 0..state.projectiles.len() {
            let cabbage = &state.cabbages[i];
            let projectile = &state.projectiles[j];
            if !projectile.kind.hurts_cabbages()
                || !cabbage.active
                || !projectile.active
                || !cabbage.rect.intersects(&projectile.rect)
            {
                continue;
            }
            let center = cabbage.rect.center();
            state.cabbages[i].active = false;
            state.projectiles[j].active = false;
            add_explosion(state, center, events);

            state.score += CABBAGE_POINTS;
            events.push(GameEvent::CabbageDestroyed { score: state.score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::{ButtonState, KeySet};
    use crate::sim::rect::Rect;
    use crate::sim::state::{Cabbage, WorldConfig};
    use glam::Vec2;

    const DT: u32 = 16;

    fn playing_state() -> GameState {
        let mut state = GameState::new(WorldConfig {
            seed: 42,
            ..WorldConfig::default()
        });
        let play = TickInput::new(
            DT,
            InputSnapshot {
                play: true,
                ..Default::default()
            },
        );
        tick(&mut state, &play);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Park every cabbage in a far corner, motionless and not about to fire
    fn calm_cabbages(state: &mut GameState) {
        for (i, cabbage) in state.cabbages.iter_mut().enumerate() {
            cabbage.rect = Rect::new(60 * i as i32, 0, cabbage.rect.width, cabbage.rect.height);
            cabbage.velocity = Vec2::ZERO;
            cabbage.fire = crate::sim::cooldown::Cooldown::cooling(u32::MAX);
        }
    }

    fn idle() -> TickInput {
        TickInput::new(DT, InputSnapshot::default())
    }

    fn with_keys(keys: KeySet) -> TickInput {
        TickInput::new(
            DT,
            InputSnapshot {
                keys,
                ..Default::default()
            },
        )
    }

    fn cabbage_on_burger(state: &GameState) -> Cabbage {
        Cabbage::new(
            state.burger.rect.center(),
            state.sizes().cabbage,
            Vec2::ZERO,
            u32::MAX,
        )
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(WorldConfig::default());
        let events = tick(&mut state, &idle());
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::MainMenu);

        let _ = playing_state();
    }

    #[test]
    fn test_pause_toggle_is_edge_triggered() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let pause = with_keys(KeySet::new().with(Key::Pause));

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Still held: no toggle
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &idle());
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);

        // Held across the unpause: stays playing
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut state = playing_state();
        tick(&mut state, &with_keys(KeySet::new().with(Key::Pause)));
        let cabbages = state.cabbages.clone();
        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.cabbages, cabbages);
    }

    #[test]
    fn test_burger_movement_and_clamp() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let start = state.burger.rect.center();
        tick(&mut state, &with_keys(KeySet::new().with(Key::Right)));
        assert_eq!(
            state.burger.rect.center(),
            start + IVec2::new(BURGER_MOVEMENT_AMOUNT, 0)
        );

        for _ in 0..200 {
            tick(&mut state, &with_keys(KeySet::new().with(Key::S)));
        }
        assert_eq!(state.burger.rect.bottom(), state.bounds().height);
    }

    #[test]
    fn test_shoot_cooldown_and_early_release() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let fire = TickInput::new(
            DT,
            InputSnapshot {
                mouse_left: ButtonState::Pressed,
                ..Default::default()
            },
        );
        let shots = |s: &GameState| {
            s.projectiles
                .iter()
                .filter(|p| p.kind == ProjectileKind::PlayerShot)
                .count()
        };

        let events = tick(&mut state, &fire);
        assert!(events.contains(&GameEvent::BurgerShot));
        assert_eq!(shots(&state), 1);
        let fries = state.sizes().french_fries;
        let shot = &state.projectiles[0];
        assert_eq!((shot.rect.width, shot.rect.height), (fries.x, fries.y));

        // Holding the button: locked out
        tick(&mut state, &fire);
        assert_eq!(shots(&state), 1);

        // Releasing resets the cooldown immediately
        tick(&mut state, &idle());
        tick(&mut state, &fire);
        assert_eq!(shots(&state), 2);
    }

    #[test]
    fn test_held_button_refires_after_threshold() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let fire = |dt| {
            TickInput::new(
                dt,
                InputSnapshot {
                    mouse_left: ButtonState::Pressed,
                    ..Default::default()
                },
            )
        };
        tick(&mut state, &fire(DT));
        tick(&mut state, &fire(BURGER_COOLDOWN_MILLISECONDS - 1));
        assert!(!state.burger.shoot.is_ready());
        let events = tick(&mut state, &fire(1));
        assert!(events.contains(&GameEvent::BurgerShot));
    }

    #[test]
    fn test_plant_ketchup_uses_supply() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let plant = TickInput::new(
            DT,
            InputSnapshot {
                mouse_right: ButtonState::Pressed,
                ..Default::default()
            },
        );
        for _ in 0..TOTAL_KETCHUP_NUMBER {
            let events = tick(&mut state, &plant);
            assert!(events.contains(&GameEvent::KetchupPlanted));
            tick(&mut state, &idle());
        }
        assert_eq!(state.burger.ketchups, 0);
        let ketchup = state.sizes().ketchup;
        assert!(state
            .projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::PlantedItem)
            .all(|p| (p.rect.width, p.rect.height) == (ketchup.x, ketchup.y)));
        let events = tick(&mut state, &plant);
        assert!(!events.contains(&GameEvent::KetchupPlanted));
    }

    #[test]
    fn test_health_15_two_hits_single_result_transition() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        state.burger.set_health(15);

        state.cabbages.push(cabbage_on_burger(&state));
        let events = tick(&mut state, &idle());
        assert_eq!(state.burger.health(), 5);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!events.contains(&GameEvent::BurgerDied));
        assert!(events.contains(&GameEvent::ExplosionStarted));

        state.cabbages.push(cabbage_on_burger(&state));
        let events = tick(&mut state, &idle());
        assert_eq!(state.burger.health(), 0);
        assert_eq!(state.phase, GamePhase::Result);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::BurgerDied).count(),
            1
        );

        // A further hit at zero health must not re-fire death
        state.phase = GamePhase::Playing;
        state.cabbages.push(cabbage_on_burger(&state));
        let events = tick(&mut state, &idle());
        assert_eq!(state.burger.health(), 0);
        assert!(!events.contains(&GameEvent::BurgerDied));
    }

    #[test]
    fn test_result_reports_score_and_returns_to_menu() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        state.score = 120;
        state.burger.set_health(5);
        state.cabbages.push(cabbage_on_burger(&state));
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Result);

        let events = tick(&mut state, &idle());
        assert!(events.contains(&GameEvent::RunFinished { score: 120 }));
        assert_eq!(state.phase, GamePhase::MainMenu);

        // Playing again starts a fresh run
        let play = TickInput::new(
            DT,
            InputSnapshot {
                play: true,
                ..Default::default()
            },
        );
        tick(&mut state, &play);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.burger.health(), BURGER_INITIAL_HEALTH);
        assert!(!state.burger_dead);
    }

    #[test]
    fn test_enemy_shot_damages_burger() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let center = state.burger.rect.center();
        state.projectiles.push(Projectile::new(
            ProjectileKind::EnemyShot,
            center,
            state.sizes().cabbage_shot,
            0.0,
        ));
        let events = tick(&mut state, &idle());
        assert_eq!(
            state.burger.health(),
            BURGER_INITIAL_HEALTH - RED_CABBAGE_PROJECTILE_DAMAGE
        );
        assert!(events.contains(&GameEvent::BurgerDamaged { health: 95 }));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_player_projectiles_do_not_hurt_burger() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let center = state.burger.rect.center();
        state.projectiles.push(Projectile::new(
            ProjectileKind::PlantedItem,
            center,
            state.sizes().ketchup,
            0.0,
        ));
        tick(&mut state, &idle());
        assert_eq!(state.burger.health(), BURGER_INITIAL_HEALTH);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_ketchup_destroys_cabbage_and_scores() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        let center = IVec2::new(400, 250);
        state.cabbages[0].rect.set_center(center);
        state.projectiles.push(Projectile::new(
            ProjectileKind::PlantedItem,
            center,
            state.sizes().ketchup,
            0.0,
        ));
        let events = tick(&mut state, &idle());
        assert_eq!(state.score, CABBAGE_POINTS);
        assert!(events.contains(&GameEvent::CabbageDestroyed {
            score: CABBAGE_POINTS
        }));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosions.len(), 1);
        // Population restored at end of tick
        assert_eq!(state.cabbages.len(), MAX_ENEMIES);
    }

    #[test]
    fn test_colliding_cabbages_bounce() {
        let mut state = playing_state();
        calm_cabbages(&mut state);
        state.cabbages.truncate(2);
        state.config.max_enemies = 2;
        state.cabbages[0].rect = Rect::new(300, 300, 48, 48);
        state.cabbages[0].velocity = Vec2::new(0.1, 0.0);
        state.cabbages[1].rect = Rect::new(340, 300, 48, 48);
        state.cabbages[1].velocity = Vec2::new(-0.1, 0.0);

        let events = tick(&mut state, &idle());
        assert!(events.contains(&GameEvent::CabbageBounced));
        assert!(state.cabbages[0].velocity.x < 0.0);
        assert!(state.cabbages[1].velocity.x > 0.0);
    }

    #[test]
    fn test_quit_requested_from_any_phase() {
        let mut state = GameState::new(WorldConfig::default());
        let events = tick(&mut state, &with_keys(KeySet::new().with(Key::Escape)));
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }
}
