//! Roomweave - seeded dungeon growth
//!
//! Grows a connected graph of non-overlapping rectangular rooms joined by
//! doors from a single seed, and walks a "current room" pointer across it
//! one door at a time.

pub mod rng;
pub mod world;
pub mod journey;
pub mod data;
pub mod save;

// Re-export commonly used types
pub use rng::Seed;
pub use world::{
    create_dungeon, generate_dungeon, generate_rooms_around, DungeonData, Door, DoorId, Room,
    RoomId, StrategyKind,
};
pub use journey::{Journey, JourneyActions, JourneyError};
