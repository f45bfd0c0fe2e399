//! World module
//!
//! Contains the dungeon data model, room geometry, and procedural generation.

pub mod geometry;
pub mod room;
pub mod door;
pub mod dungeon;
pub mod generation;

pub use geometry::{Area, Edge, Position};
pub use room::{Room, RoomId, RoomType};
pub use door::{compute_doors, Door, DoorId, DOOR_HEIGHT, DOOR_WIDTH};
pub use dungeon::{create_dungeon, DungeonData};
pub use generation::{
    generate_dungeon, generate_rooms_around, spawn_generation, ExpandOptions, GenerateOptions,
    GenerationError, Snapshot, StrategyKind,
};
