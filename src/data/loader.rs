//! RON settings loader
//!
//! Loads generation settings from an external RON file, with fallback to
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::Seed;
use crate::world::generation::MAX_CONSECUTIVE_FAILURES;
use crate::world::{ExpandOptions, GenerateOptions, RoomId, StrategyKind};

/// Default settings location, relative to the working directory
pub const SETTINGS_DIR: &str = "assets/data";
pub const SETTINGS_FILE: &str = "generation.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Tunables for generation and expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Fixed seed, or entropy when absent
    pub seed: Option<Seed>,
    pub strategy: StrategyKind,
    pub max_rooms: u32,
    /// Placement attempts allowed per requested room
    pub attempts_per_room: u32,
    pub max_consecutive_failures: u32,
    pub expand: ExpandSettings,
}

/// Budgets for growing around a single room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandSettings {
    pub recurse_count: u32,
    pub room_count: u32,
    pub max_attempts: u32,
    pub max_consecutive_failures: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            strategy: StrategyKind::Random,
            max_rooms: 50,
            attempts_per_room: 2,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
            expand: ExpandSettings::default(),
        }
    }
}

impl Default for ExpandSettings {
    fn default() -> Self {
        let defaults = ExpandOptions::new(0);
        Self {
            recurse_count: defaults.recurse_count,
            room_count: defaults.room_count,
            max_attempts: defaults.max_attempts,
            max_consecutive_failures: defaults.max_consecutive_failures,
        }
    }
}

impl GenerationSettings {
    /// Load from `assets/data/generation.ron`, or use defaults
    pub fn load() -> Self {
        let path = settings_path(Path::new(SETTINGS_DIR));
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings = ron::from_str(&content)?;
        log::info!("Generation settings loaded from {:?}", path);
        Ok(settings)
    }

    /// Options for a fresh full generation
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            dungeon: None,
            max_rooms: self.max_rooms,
            max_attempts: self.max_rooms.saturating_mul(self.attempts_per_room),
            max_consecutive_failures: self.max_consecutive_failures,
            strategy: self.strategy,
            seed: self.seed,
        }
    }

    pub fn expand_options(&self, target_room_id: RoomId) -> ExpandOptions {
        ExpandOptions {
            target_room_id,
            recurse_count: self.expand.recurse_count,
            room_count: self.expand.room_count,
            max_attempts: self.expand.max_attempts,
            max_consecutive_failures: self.expand.max_consecutive_failures,
        }
    }
}

fn settings_path(base_path: &Path) -> PathBuf {
    base_path.join(SETTINGS_FILE)
}

/// Write the default settings to `base_path` for easy editing
pub fn export_default_settings(base_path: &Path) -> Result<PathBuf, SettingsError> {
    fs::create_dir_all(base_path)?;

    let path = settings_path(base_path);
    let ron = ron::ser::to_string_pretty(
        &GenerationSettings::default(),
        ron::ser::PrettyConfig::default(),
    )?;
    fs::write(&path, ron)?;

    log::info!("Default settings written to {:?}", path);
    Ok(path)
}
