//! Save/load system
//!
//! Handles saving and loading dungeons to and from disk.

pub mod save_game;

pub use save_game::{SaveData, SaveError, SaveSlots, SaveSummary, SLOT_COUNT};
