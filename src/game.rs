//! Frame-driven orchestrator
//!
//! Owns the simulation plus its collaborators. Each frame: tick the world,
//! route the resulting events to audio and the high-score store, then let
//! the driver draw.

use crate::audio::{AudioManager, AudioPlayer};
use crate::highscores::HighScores;
use crate::renderer::{Content, Renderer, draw};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Whether the driver should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Game instance holding all state
pub struct Game<A: AudioPlayer> {
    state: GameState,
    content: Content,
    high_scores: HighScores,
    settings: Settings,
    audio: AudioManager<A>,
}

impl<A: AudioPlayer> Game<A> {
    /// Build the world and read (or create) the high-score table
    pub fn new(settings: Settings, content: Content, audio: A) -> Self {
        let high_scores =
            HighScores::load_or_create(&settings.high_score_path, settings.max_high_scores);
        Self::with_high_scores(settings, content, audio, high_scores)
    }

    /// Build the world around an already-loaded table
    pub fn with_high_scores(
        settings: Settings,
        content: Content,
        audio: A,
        high_scores: HighScores,
    ) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Starting world with seed {}", seed);
        let state = GameState::new(settings.world_config(seed, content.sizes()));
        let audio = AudioManager::from_settings(audio, &settings);
        Self {
            state,
            content,
            high_scores,
            settings,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput) -> Flow {
        let events = tick(&mut self.state, input);
        let mut flow = Flow::Continue;

        for event in &events {
            self.audio.handle_event(event);
            match *event {
                GameEvent::RunFinished { score } => self.record_score(score),
                GameEvent::QuitRequested => flow = Flow::Exit,
                _ => {}
            }
        }

        flow
    }

    /// Draw the current frame (read-only)
    pub fn draw(&self, renderer: &mut impl Renderer) {
        draw(&self.state, &self.content, &self.high_scores, renderer);
    }

    /// Insert a finished run's score and persist the table if it changed
    fn record_score(&mut self, score: u32) {
        let Some((table, rank)) = self
            .high_scores
            .with_score(&self.settings.player_name, score)
        else {
            log::info!("Score {} did not make the high score table", score);
            return;
        };

        log::info!("New high score {} at rank {}", score, rank + 1);
        self.high_scores = table;
        if let Err(err) = self.high_scores.save(&self.settings.high_score_path) {
            log::error!("Failed to save high scores: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::persistence::test_util::scratch_path;
    use crate::platform::input::{InputSnapshot, Key, KeySet};
    use crate::renderer::FixedSizeLoader;
    use crate::sim::{Cabbage, GamePhase};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioPlayer for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(effect);
        }
    }

    fn game(capacity: usize) -> Game<Recorder> {
        let settings = Settings {
            seed: Some(11),
            high_score_path: scratch_path("highscores.json"),
            max_high_scores: capacity,
            player_name: "ada".into(),
            ..Settings::default()
        };
        let content = Content::load(&mut FixedSizeLoader::default());
        Game::new(settings, content, Recorder::default())
    }

    fn input(snapshot: InputSnapshot) -> TickInput {
        TickInput::new(16, snapshot)
    }

    /// Kill the burger this tick
    fn lethal_hit(game: &mut Game<Recorder>) {
        let state = game.state_mut();
        state.burger.set_health(1);
        let center = state.burger.rect.center();
        let size = state.sizes().cabbage;
        state.cabbages.push(Cabbage::new(center, size, Vec2::ZERO, u32::MAX));
    }

    #[test]
    fn test_run_end_records_and_persists_high_score() {
        let mut game = game(3);
        assert_eq!(game.high_scores().len(), 1);

        game.update(&input(InputSnapshot {
            play: true,
            ..Default::default()
        }));
        assert_eq!(game.state().phase, GamePhase::Playing);

        game.state_mut().score = 500;
        lethal_hit(&mut game);
        game.update(&input(InputSnapshot::default()));
        assert_eq!(game.state().phase, GamePhase::Result);
        assert!(game.audio().player().0.contains(&SoundEffect::BurgerDeath));

        game.update(&input(InputSnapshot::default()));
        assert_eq!(game.state().phase, GamePhase::MainMenu);
        assert_eq!(game.high_scores().top_score(), Some(500));
        assert_eq!(game.high_scores().entries()[0].name, "ada");

        let on_disk = HighScores::load(&game.settings.high_score_path).unwrap();
        assert_eq!(&on_disk, game.high_scores());
    }

    #[test]
    fn test_low_score_leaves_full_table_alone() {
        let mut game = game(1);
        game.update(&input(InputSnapshot {
            play: true,
            ..Default::default()
        }));
        game.state_mut().score = 10;
        lethal_hit(&mut game);
        game.update(&input(InputSnapshot::default()));
        game.update(&input(InputSnapshot::default()));
        assert_eq!(game.high_scores(), &HighScores::with_default_entry(1));
    }

    #[test]
    fn test_escape_exits() {
        let mut game = game(1);
        let flow = game.update(&input(InputSnapshot {
            keys: KeySet::new().with(Key::Escape),
            ..Default::default()
        }));
        assert_eq!(flow, Flow::Exit);
    }

    #[test]
    fn test_menu_quit_exits() {
        let mut game = game(1);
        let flow = game.update(&input(InputSnapshot {
            quit: true,
            ..Default::default()
        }));
        assert_eq!(flow, Flow::Exit);
        assert_eq!(game.update(&input(InputSnapshot::default())), Flow::Continue);
    }
}
