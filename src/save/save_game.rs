//! Dungeon save slots
//!
//! Saves a dungeon and the journey's current room as JSON files in the
//! user's data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{DungeonData, RoomId, StrategyKind};

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;
/// Number of save slots offered
pub const SLOT_COUNT: u8 = 3;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub dungeon: DungeonData,
    /// Where the journey was, if one had started
    pub current_room_id: Option<RoomId>,
}

impl SaveData {
    pub fn new(dungeon: DungeonData, current_room_id: Option<RoomId>) -> Self {
        Self {
            version: SAVE_VERSION,
            dungeon,
            current_room_id,
        }
    }
}

/// Brief summary of a save for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub rooms: usize,
    pub max_depth: u32,
    pub strategy: Option<StrategyKind>,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Invalid save data: {0}")]
    InvalidData(String),
}

/// A directory of numbered save files
#[derive(Debug, Clone)]
pub struct SaveSlots {
    dir: PathBuf,
}

impl SaveSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The per-user data directory, or `./saves` when there is none
    pub fn default_location() -> Self {
        use directories::ProjectDirs;

        let dir = if let Some(proj_dirs) = ProjectDirs::from("com", "roomweave", "Roomweave") {
            proj_dirs.data_local_dir().join("saves")
        } else {
            PathBuf::from("./saves")
        };
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the path for a specific save slot
    pub fn path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("dungeon_{}.json", slot))
    }

    pub fn exists(&self, slot: u8) -> bool {
        self.path(slot).exists()
    }

    /// Save to a slot, creating the directory if needed
    pub fn save(&self, slot: u8, data: &SaveData) -> Result<(), SaveError> {
        validate(data)?;
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(slot), json)?;

        log::info!("Dungeon saved to slot {}", slot);
        Ok(())
    }

    /// Load a slot, checking version and consistency
    pub fn load(&self, slot: u8) -> Result<SaveData, SaveError> {
        let data = fs::read_to_string(self.path(slot))?;
        let save: SaveData = serde_json::from_str(&data)?;

        if save.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: save.version,
            });
        }
        validate(&save)?;

        log::info!("Dungeon loaded from slot {}", slot);
        Ok(save)
    }

    pub fn delete(&self, slot: u8) -> Result<(), SaveError> {
        let path = self.path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            log::info!("Deleted save slot {}", slot);
        }
        Ok(())
    }

    /// Every slot with a summary where a readable save exists
    pub fn list(&self) -> Vec<(u8, Option<SaveSummary>)> {
        (0..SLOT_COUNT)
            .map(|slot| {
                let summary = if self.exists(slot) {
                    self.load(slot).ok().map(|save| SaveSummary {
                        rooms: save.dungeon.rooms.len(),
                        max_depth: save.dungeon.max_depth,
                        strategy: save.dungeon.strategy,
                    })
                } else {
                    None
                };
                (slot, summary)
            })
            .collect()
    }
}

/// The current room must exist in the saved dungeon
fn validate(save: &SaveData) -> Result<(), SaveError> {
    match save.current_room_id {
        Some(id) if save.dungeon.room_by_id(id).is_none() => {
            Err(SaveError::InvalidData(format!("current room {} is not in the dungeon", id)))
        }
        _ => Ok(()),
    }
}
