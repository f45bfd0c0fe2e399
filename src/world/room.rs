//! Rooms
//!
//! Rooms live in an arena (the dungeon's room list). Ancestry is an id
//! lookup through `parent_id`, never a pointer.

use serde::{Deserialize, Serialize};

use super::geometry::{Area, Edge, Position};
use crate::rng::{self, Seed};

/// Unique, stable room identifier
pub type RoomId = u32;

pub const ROOM_SIZE_SMALL: (i32, i32) = (45, 50);
pub const ROOM_SIZE_NORMAL: (i32, i32) = (50, 80);
pub const ROOM_SIZE_LARGE: (i32, i32) = (80, 120);

/// Room size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Normal,
    Large,
    Small,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Normal, RoomType::Large, RoomType::Small];

    /// Inclusive side-length range for this type
    pub fn size_range(self) -> (i32, i32) {
        match self {
            RoomType::Small => ROOM_SIZE_SMALL,
            RoomType::Normal => ROOM_SIZE_NORMAL,
            RoomType::Large => ROOM_SIZE_LARGE,
        }
    }

    /// Draw a type uniformly
    pub fn random(seed: Seed) -> (Seed, RoomType) {
        let (seed, idx) = rng::index(seed, Self::ALL.len());
        (seed, Self::ALL[idx])
    }

    /// Draw width then height from the type's range
    pub fn random_size(self, seed: Seed) -> (Seed, i32, i32) {
        let (min, max) = self.size_range();
        let (seed, width) = rng::int_range(seed, min, max);
        let (seed, height) = rng::int_range(seed, min, max);
        (seed, width, height)
    }
}

/// A placed room; never resized or removed once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub area: Area,
    pub room_type: RoomType,
    #[serde(default)]
    pub is_central: bool,
    /// Sides a child may attach to; `None` means all four
    #[serde(default)]
    pub allowed_edges: Option<Vec<Edge>>,
    #[serde(default)]
    pub parent_id: Option<RoomId>,
    #[serde(default)]
    pub depth: u32,
}

impl Room {
    pub fn center(&self) -> Position {
        self.area.center()
    }

    /// Sides children may attach to, in North/East/South/West order
    pub fn allowed_edges(&self) -> &[Edge] {
        self.allowed_edges.as_deref().unwrap_or(&Edge::ALL)
    }

    /// Whether this room carries an explicit edge constraint
    pub fn is_constrained(&self) -> bool {
        self.allowed_edges.is_some()
    }

    pub fn allows_edge(&self, edge: Edge) -> bool {
        self.allowed_edges().contains(&edge)
    }
}

/// Deepest room depth in the list (0 when empty)
pub fn max_room_depth(rooms: &[Room]) -> u32 {
    rooms.iter().map(|r| r.depth).max().unwrap_or(0)
}

/// Number of rooms that grew directly from `room_id`
pub fn children_count(rooms: &[Room], room_id: RoomId) -> usize {
    rooms.iter().filter(|r| r.parent_id == Some(room_id)).count()
}

/// Walk the parent chain from `room_id` up to the root (exclusive of itself)
pub fn ancestors(rooms: &[Room], room_id: RoomId) -> Vec<RoomId> {
    let mut chain = Vec::new();
    let mut current = rooms.iter().find(|r| r.id == room_id).and_then(|r| r.parent_id);
    while let Some(id) = current {
        // Guard against a malformed (cyclic) save
        if chain.contains(&id) {
            break;
        }
        chain.push(id);
        current = rooms.iter().find(|r| r.id == id).and_then(|r| r.parent_id);
    }
    chain
}
