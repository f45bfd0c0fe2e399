//! Room placement
//!
//! Grows one room at a time flush against an existing room's wall.

use crate::rng::{self, Seed};
use crate::world::door::door_between;
use crate::world::geometry::{Area, Edge};
use crate::world::room::{Room, RoomId, RoomType};

/// Side of the square canvas the central room sits in the middle of
pub const CANVAS_SIZE: i32 = 1024;
/// Side of the central room
pub const CENTRAL_ROOM_SIZE: i32 = 100;
/// Candidates are clamped into a square world of this side, centred on the origin
pub const WORLD_SIZE: i32 = 20_000;

/// The depth-0 room every fresh generation starts from
///
/// Only its north wall accepts children, so early growth fans out one way.
pub fn central_room(id: RoomId) -> Room {
    let origin = CANVAS_SIZE / 2 - CENTRAL_ROOM_SIZE / 2;
    Room {
        id,
        area: Area::new(origin, origin, CENTRAL_ROOM_SIZE, CENTRAL_ROOM_SIZE),
        room_type: RoomType::Normal,
        is_central: true,
        allowed_edges: Some(vec![Edge::North]),
        parent_id: None,
        depth: 0,
    }
}

/// Try to place one new room against `target`
///
/// Draws a type and size, then walks the target's allowed edges in shuffled
/// order. A candidate is accepted when it still touches the target after
/// world clamping, overlaps nothing in `existing`, and would get a door to
/// the target. Returns `None` when every edge is rejected.
pub fn place_room_around(
    target: &Room,
    existing: &[Room],
    id: RoomId,
    seed: Seed,
) -> (Seed, Option<Room>) {
    let (seed, room_type) = RoomType::random(seed);
    let (seed, width, height) = room_type.random_size(seed);
    let (seed, edges) = rng::shuffle(seed, target.allowed_edges());

    for edge in edges {
        let area = target.area.adjacent(edge, width, height).clamped(WORLD_SIZE);

        if !area.touches(&target.area) {
            continue;
        }
        if existing.iter().any(|r| r.area.overlaps(&area)) {
            continue;
        }

        let room = Room {
            id,
            area,
            room_type,
            is_central: false,
            allowed_edges: None,
            parent_id: Some(target.id),
            depth: target.depth + 1,
        };

        // Keep every room reachable from its parent
        if door_between(target, &room).is_none() {
            continue;
        }

        return (seed, Some(room));
    }

    (seed, None)
}
