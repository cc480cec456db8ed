//! Burger Blast entry point
//!
//! Native headless driver: runs one autopiloted round at a fixed 60 Hz frame
//! clock against the logging audio backend and a recording renderer. A
//! windowing layer would replace the autopilot with real input polling.

use std::path::PathBuf;

use burger_blast::platform::{ButtonState, InputSnapshot, Key, KeySet};
use burger_blast::renderer::{Content, FixedSizeLoader, RecordingRenderer};
use burger_blast::settings::{DEFAULT_SETTINGS_PATH, Settings};
use burger_blast::sim::{GamePhase, GameState, TickInput};
use burger_blast::{Flow, Game, audio::LogAudio};

/// Milliseconds per frame at 60 Hz
const FRAME_MS: u32 = 16;
/// Give up after ten simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Burger Blast (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load_or_default(&settings_path);

    let content = Content::load(&mut FixedSizeLoader::default());
    let mut game = Game::new(settings, content, LogAudio);
    let mut renderer = RecordingRenderer::default();

    let mut frames = 0;
    let mut started = false;
    while frames < MAX_FRAMES {
        let input = autopilot(game.state(), started);
        started = true;

        if game.update(&TickInput::new(FRAME_MS, input)) == Flow::Exit {
            break;
        }
        renderer.commands.clear();
        game.draw(&mut renderer);
        frames += 1;

        if game.state().phase == GamePhase::MainMenu && frames > 1 {
            break;
        }
    }

    log::info!(
        "Round over after {} frames: score {}, health {}",
        frames,
        game.state().score,
        game.state().burger.health()
    );
    println!("{}", game.high_scores().scoreboard());
}

/// Press play, then chase the nearest cabbage horizontally while firing
fn autopilot(state: &GameState, started: bool) -> InputSnapshot {
    if !started {
        return InputSnapshot {
            play: true,
            ..Default::default()
        };
    }

    let burger = state.burger.rect.center();
    let target = state
        .cabbages
        .iter()
        .map(|c| c.rect.center())
        .min_by_key(|c| (c.x - burger.x).abs());

    let mut keys = KeySet::new();
    if let Some(target) = target {
        if target.x < burger.x - 4 {
            keys.insert(Key::Left);
        } else if target.x > burger.x + 4 {
            keys.insert(Key::Right);
        }
    }

    // Alternate press/release so the early-release rule re-arms the shot
    let fire = if state.time_ticks % 2 == 0 {
        ButtonState::Pressed
    } else {
        ButtonState::Released
    };

    InputSnapshot {
        keys,
        mouse_left: fire,
        mouse_right: if state.time_ticks % 600 == 0 {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        },
        ..Default::default()
    }
}
