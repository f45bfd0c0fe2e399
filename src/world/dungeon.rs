//! Dungeon data model
//!
//! `DungeonData` is plain serializable data. Generation returns a new value
//! after every structural change; callers replace theirs wholesale.

use serde::{Deserialize, Serialize};

use super::door::{compute_doors, Door, DoorId};
use super::generation::StrategyKind;
use super::geometry::Position;
use super::room::{max_room_depth, Room, RoomId};
use crate::rng::{self, Seed};

/// First id handed out by a fresh dungeon
pub const FIRST_ROOM_ID: RoomId = 10;

/// One dungeon: its rooms, the doors derived from them, and the seed to
/// continue growing from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonData {
    /// Next room id to hand out
    pub id_inc: RoomId,
    pub seed: Seed,
    /// In growth order
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub strategy: Option<StrategyKind>,
    pub max_depth: u32,
}

/// An empty dungeon with the given seed (or a fresh one from entropy)
pub fn create_dungeon(seed: Option<Seed>) -> DungeonData {
    let seed = rng::normalize_seed(seed.unwrap_or_else(rng::random_seed));
    DungeonData {
        id_inc: FIRST_ROOM_ID,
        seed,
        rooms: Vec::new(),
        doors: Vec::new(),
        strategy: None,
        max_depth: 0,
    }
}

impl DungeonData {
    /// Hand out the next room id
    pub fn next_room_id(&mut self) -> RoomId {
        let id = self.id_inc;
        self.id_inc += 1;
        id
    }

    pub fn room_by_id(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn door_by_id(&self, id: &DoorId) -> Option<&Door> {
        self.doors.iter().find(|d| &d.id == id)
    }

    /// The room across `door` from `from_room_id`
    pub fn connecting_room(&self, from_room_id: RoomId, door: &Door) -> Option<&Room> {
        door.other_side(from_room_id).and_then(|id| self.room_by_id(id))
    }

    /// Doors incident to a room
    pub fn room_doors(&self, room_id: RoomId) -> Vec<&Door> {
        self.doors.iter().filter(|d| d.connects(room_id)).collect()
    }

    /// Doors incident to `room_id` that do not also touch `excluding`
    pub fn room_doors_excluding(&self, room_id: RoomId, excluding: RoomId) -> Vec<&Door> {
        self.doors
            .iter()
            .filter(|d| d.connects(room_id) && !d.connects(excluding))
            .collect()
    }

    pub fn room_center(&self, room_id: RoomId) -> Option<Position> {
        self.room_by_id(room_id).map(Room::center)
    }

    pub fn is_point_in_room(&self, point: Position, room_id: RoomId) -> bool {
        self.room_by_id(room_id).is_some_and(|r| r.area.contains_point(point))
    }

    /// All rooms whose bounds contain the point (neighbours share edges, so
    /// a point on a wall can hit two)
    pub fn rooms_at_point(&self, point: Position) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.area.contains_point(point)).collect()
    }

    /// Copy of the dungeon with one door's open flag changed
    pub fn with_door_state(&self, door_id: &DoorId, open: bool) -> DungeonData {
        let mut next = self.clone();
        next.set_door_open(door_id, open);
        next
    }

    pub fn set_door_open(&mut self, door_id: &DoorId, open: bool) {
        if let Some(door) = self.doors.iter_mut().find(|d| &d.id == door_id) {
            door.is_open = open;
        }
    }

    /// Rebuild the derived fields from the room list
    ///
    /// Open flags survive for doors that still exist.
    pub fn refresh_derived(&mut self) {
        let mut doors = compute_doors(&self.rooms);
        for door in &mut doors {
            door.is_open = self.door_by_id(&door.id).is_some_and(|d| d.is_open);
        }
        self.doors = doors;
        self.max_depth = max_room_depth(&self.rooms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::geometry::Area;
    use crate::world::room::RoomType;

    fn room(id: RoomId, area: Area, parent_id: Option<RoomId>, depth: u32) -> Room {
        Room {
            id,
            area,
            room_type: RoomType::Normal,
            is_central: parent_id.is_none(),
            allowed_edges: None,
            parent_id,
            depth,
        }
    }

    /// Three rooms in an L: 10 in the middle, 11 east of it, 12 south of it
    fn l_shape() -> DungeonData {
        let mut dungeon = create_dungeon(Some(1974));
        dungeon.rooms = vec![
            room(10, Area::new(0, 0, 60, 60), None, 0),
            room(11, Area::new(60, 0, 60, 60), Some(10), 1),
            room(12, Area::new(0, 60, 60, 60), Some(10), 1),
        ];
        dungeon.id_inc = 13;
        dungeon.refresh_derived();
        dungeon
    }

    #[test]
    fn test_create_dungeon() {
        let dungeon = create_dungeon(Some(1974));
        assert_eq!(dungeon.seed, 1974);
        assert_eq!(dungeon.id_inc, FIRST_ROOM_ID);
        assert!(dungeon.rooms.is_empty());
        assert!(dungeon.strategy.is_none());

        let zero = create_dungeon(Some(0));
        assert_eq!(zero.seed, 1);
    }

    #[test]
    fn test_next_room_id() {
        let mut dungeon = create_dungeon(Some(5));
        assert_eq!(dungeon.next_room_id(), 10);
        assert_eq!(dungeon.next_room_id(), 11);
        assert_eq!(dungeon.id_inc, 12);
    }

    #[test]
    fn test_queries() {
        let dungeon = l_shape();
        assert_eq!(dungeon.max_depth, 1);
        assert_eq!(dungeon.doors.len(), 2);
        assert_eq!(dungeon.room_by_id(11).map(|r| r.id), Some(11));
        assert!(dungeon.room_by_id(99).is_none());

        let door = dungeon.door_by_id(&DoorId::new(10, 11)).expect("door 10-11");
        assert_eq!(dungeon.connecting_room(10, door).map(|r| r.id), Some(11));
        assert_eq!(dungeon.connecting_room(11, door).map(|r| r.id), Some(10));
        assert!(dungeon.connecting_room(12, door).is_none());

        assert_eq!(dungeon.room_doors(10).len(), 2);
        assert_eq!(dungeon.room_doors(11).len(), 1);
        let excluding: Vec<_> = dungeon
            .room_doors_excluding(10, 11)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(excluding, vec![DoorId::new(10, 12)]);
    }

    #[test]
    fn test_point_queries() {
        let dungeon = l_shape();
        assert_eq!(dungeon.room_center(11), Some(Position::new(90.0, 30.0)));
        assert!(dungeon.is_point_in_room(Position::new(90.0, 30.0), 11));
        assert!(!dungeon.is_point_in_room(Position::new(90.0, 30.0), 12));
        assert!(!dungeon.is_point_in_room(Position::new(0.0, 0.0), 99));
        // On the shared wall
        assert_eq!(dungeon.rooms_at_point(Position::new(60.0, 30.0)).len(), 2);
    }

    #[test]
    fn test_door_state_survives_refresh() {
        let mut dungeon = l_shape();
        let id = DoorId::new(10, 12);
        let opened = dungeon.with_door_state(&id, true);
        assert!(opened.door_by_id(&id).is_some_and(|d| d.is_open));
        assert!(!dungeon.door_by_id(&id).is_some_and(|d| d.is_open));

        dungeon = opened;
        dungeon.refresh_derived();
        assert!(dungeon.door_by_id(&id).is_some_and(|d| d.is_open));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut dungeon = l_shape();
        dungeon.strategy = Some(StrategyKind::Branching);
        let json = serde_json::to_string(&dungeon).expect("serialize");
        assert!(json.contains("\"strategy\":\"branch\""));
        let back: DungeonData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, dungeon);
    }
}
