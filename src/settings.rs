//! Game settings and preferences
//!
//! Read from a JSON file at startup. Missing keys take their defaults, so
//! an empty `{}` is a valid settings file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, PersistenceError};
use crate::sim::{Bounds, EntitySizes, WorldConfig};

/// Default settings file name
pub const DEFAULT_SETTINGS_PATH: &str = "burger_blast_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: i32,
    pub window_height: i32,

    // === Gameplay ===
    /// Cabbage population kept alive during play
    pub max_enemies: usize,
    /// Placement samples before a cabbage spawns regardless of overlap
    pub spawn_max_attempts: u32,
    /// RNG seed; None draws one from the OS
    pub seed: Option<u64>,

    // === High scores ===
    pub high_score_path: PathBuf,
    pub max_high_scores: usize,
    /// Name recorded with new high scores
    pub player_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            max_enemies: MAX_ENEMIES,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,
            seed: None,

            high_score_path: PathBuf::from("highscores.json"),
            max_high_scores: MAX_NUMBER_OF_HIGHSCORES,
            player_name: "player".to_string(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.window_width, self.window_height)
    }

    /// Simulation parameters for these settings
    pub fn world_config(&self, seed: u64, sizes: EntitySizes) -> WorldConfig {
        WorldConfig {
            bounds: self.bounds(),
            max_enemies: self.max_enemies,
            spawn_max_attempts: self.spawn_max_attempts,
            seed,
            sizes,
        }
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        persistence::load_json(path)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
