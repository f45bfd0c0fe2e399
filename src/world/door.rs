//! Door detection
//!
//! Doors are derived data: the list is rebuilt from the full room list on
//! every structural change and is never patched incrementally.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{Edge, Position};
use super::room::{Room, RoomId};

/// Width of a door opening on a north/south wall
pub const DOOR_WIDTH: i32 = 8;
/// Height of a door opening on an east/west wall
pub const DOOR_HEIGHT: i32 = 12;

/// Stable door identifier derived from the two rooms it joins
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoorId(String);

impl DoorId {
    pub fn new(room1: RoomId, room2: RoomId) -> Self {
        Self(format!("door-{}-{}", room1, room2))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opening between two touching rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub room1: RoomId,
    pub room2: RoomId,
    /// Anchor of the door-sized opening
    pub position: Position,
    /// Side of the shallower room the opening sits on, pointing toward the
    /// deeper one; `room1`'s side when depths tie
    pub dir: Edge,
    /// Transient navigation state; not part of door existence
    #[serde(default)]
    pub is_open: bool,
}

impl Door {
    pub fn connects(&self, room_id: RoomId) -> bool {
        self.room1 == room_id || self.room2 == room_id
    }

    /// The room on the other side from `room_id`
    pub fn other_side(&self, room_id: RoomId) -> Option<RoomId> {
        if self.room1 == room_id {
            Some(self.room2)
        } else if self.room2 == room_id {
            Some(self.room1)
        } else {
            None
        }
    }
}

/// Door anchor and direction for a touching pair, if one qualifies
///
/// The target is `room1` when it carries an edge constraint, otherwise
/// `room2`. The touching side of the target must be allowed, and the shared
/// span must fit the opening. The returned edge points from the lower-depth
/// room toward the other, with ties going to `room1`.
pub fn door_between(room1: &Room, room2: &Room) -> Option<(Position, Edge)> {
    if !room1.area.touches(&room2.area) {
        return None;
    }

    let (target, other) = if room1.is_constrained() { (room1, room2) } else { (room2, room1) };
    let edge = target.area.touching_edge(&other.area)?;
    if !target.allows_edge(edge) {
        return None;
    }

    let t = &target.area;
    let o = &other.area;
    let overlap = t.span_overlap(o, edge);

    let position = if edge.is_horizontal() {
        if overlap < DOOR_WIDTH {
            return None;
        }
        let x = t.x.max(o.x) as f64 + (overlap - DOOR_WIDTH) as f64 / 2.0;
        let wall = if edge == Edge::North { t.y } else { t.bottom() };
        Position::new(x, wall as f64 - DOOR_HEIGHT as f64 / 2.0)
    } else {
        if overlap < DOOR_HEIGHT {
            return None;
        }
        let y = t.y.max(o.y) as f64 + (overlap - DOOR_HEIGHT) as f64 / 2.0;
        let wall = if edge == Edge::West { t.x } else { t.right() };
        Position::new(wall as f64 - DOOR_WIDTH as f64 / 2.0, y)
    };

    let (lower, upper) = if room2.depth < room1.depth { (room2, room1) } else { (room1, room2) };
    let dir = lower.area.touching_edge(&upper.area)?;

    Some((position, dir))
}

/// Every door implied by the room list, in pair order
pub fn compute_doors(rooms: &[Room]) -> Vec<Door> {
    let mut doors = Vec::new();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if let Some((position, dir)) = door_between(a, b) {
                doors.push(Door {
                    id: DoorId::new(a.id, b.id),
                    room1: a.id,
                    room2: b.id,
                    position,
                    dir,
                    is_open: false,
                });
            }
        }
    }
    doors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::geometry::Area;
    use crate::world::room::RoomType;

    fn room(id: RoomId, area: Area) -> Room {
        Room {
            id,
            area,
            room_type: RoomType::Normal,
            is_central: false,
            allowed_edges: None,
            parent_id: None,
            depth: 0,
        }
    }

    #[test]
    fn test_touching_rooms_get_one_door() {
        let rooms = vec![room(1, Area::new(0, 0, 60, 60)), room(2, Area::new(60, 0, 60, 60))];
        let doors = compute_doors(&rooms);
        assert_eq!(doors.len(), 1);

        let door = &doors[0];
        assert_eq!((door.room1, door.room2), (1, 2));
        assert_eq!(door.id, DoorId::new(1, 2));
        // Equal depths: read from room 1, whose east wall holds the door
        assert_eq!(door.dir, Edge::East);
        assert_eq!(door.position, Position::new(56.0, 24.0));
        assert!(!door.is_open);
    }

    #[test]
    fn test_dir_points_from_shallower_room() {
        let mut parent = room(1, Area::new(0, 0, 60, 60));
        parent.depth = 2;
        let mut child = room(2, Area::new(60, 0, 60, 60));
        child.depth = 3;
        child.parent_id = Some(1);

        let door = &compute_doors(&[parent.clone(), child.clone()])[0];
        assert_eq!(door.dir, Edge::East);

        // Listing the deeper room first does not flip the direction
        let door = &compute_doors(&[child, parent])[0];
        assert_eq!((door.room1, door.room2), (2, 1));
        assert_eq!(door.dir, Edge::East);
    }

    #[test]
    fn test_one_pixel_gap_gives_no_door() {
        let rooms = vec![room(1, Area::new(0, 0, 60, 60)), room(2, Area::new(61, 0, 60, 60))];
        assert!(compute_doors(&rooms).is_empty());
    }

    #[test]
    fn test_disallowed_edge_gives_no_door() {
        let mut central = room(1, Area::new(0, 0, 100, 100));
        central.allowed_edges = Some(vec![Edge::North]);
        let east = room(2, Area::new(100, 0, 60, 60));
        let north = room(3, Area::new(0, -60, 60, 60));

        let doors = compute_doors(&[central, east, north]);
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].room2, 3);
        assert_eq!(doors[0].dir, Edge::North);
        assert_eq!(doors[0].position, Position::new(26.0, -6.0));
    }

    #[test]
    fn test_short_overlap_gives_no_door() {
        // Shares only 10px of wall vertically, door needs 12
        let rooms = vec![room(1, Area::new(0, 0, 60, 60)), room(2, Area::new(60, 50, 60, 60))];
        assert!(rooms[0].area.touches(&rooms[1].area));
        assert!(compute_doors(&rooms).is_empty());

        // 8px of horizontal wall is exactly enough
        let rooms = vec![room(1, Area::new(0, 0, 60, 60)), room(2, Area::new(52, 60, 60, 60))];
        assert_eq!(compute_doors(&rooms).len(), 1);
    }

    #[test]
    fn test_recompute_is_pure() {
        let rooms = vec![
            room(1, Area::new(0, 0, 60, 60)),
            room(2, Area::new(60, 0, 60, 60)),
            room(3, Area::new(0, 60, 60, 60)),
        ];
        assert_eq!(compute_doors(&rooms), compute_doors(&rooms));
        assert_eq!(compute_doors(&rooms).len(), 2);
    }

    #[test]
    fn test_other_side() {
        let rooms = vec![room(4, Area::new(0, 0, 60, 60)), room(9, Area::new(0, 60, 60, 60))];
        let door = &compute_doors(&rooms)[0];
        assert_eq!(door.other_side(4), Some(9));
        assert_eq!(door.other_side(9), Some(4));
        assert_eq!(door.other_side(5), None);
        assert!(door.connects(9));
    }
}
