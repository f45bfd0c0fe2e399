//! Room-to-room journeys
//!
//! A journey holds the "current room" pointer and walks it across doors,
//! sequencing door, camera and unmount animations through [`JourneyActions`].
//! Exactly the current room and its doors are visible while idle.

mod actions;

pub use actions::{HeadlessActions, JourneyActions};

use thiserror::Error;

use crate::world::{DoorId, DungeonData, RoomId};

/// Graph-consistency failures; never retried automatically
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JourneyError {
    #[error("door {0} not found")]
    DoorNotFound(DoorId),
    #[error("no room across door {door_id} from room {room_id}")]
    ConnectingRoomNotFound { door_id: DoorId, room_id: RoomId },
    #[error("room {0} not found")]
    RoomNotFound(RoomId),
}

/// Where the journey is in a transition
///
/// `move_to_room` borrows the journey mutably, so `Transitioning` is only seen
/// from outside when a transition future is dropped before it finishes (for
/// example under a timeout). The journey then still points at the room it
/// left, and the door may be left open in whatever dungeon the caller kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyState {
    Idle,
    Transitioning(DoorId),
}

/// Rooms and doors currently shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    pub rooms: Vec<RoomId>,
    pub doors: Vec<DoorId>,
}

impl VisibleSet {
    /// Exactly one room and its doors
    pub fn around(dungeon: &DungeonData, room_id: RoomId) -> Self {
        Self {
            rooms: vec![room_id],
            doors: dungeon.room_doors(room_id).into_iter().map(|d| d.id.clone()).collect(),
        }
    }

    /// Add another room's view without dropping what is already shown
    fn extend(&mut self, other: VisibleSet) {
        for room in other.rooms {
            if !self.rooms.contains(&room) {
                self.rooms.push(room);
            }
        }
        for door in other.doors {
            if !self.doors.contains(&door) {
                self.doors.push(door);
            }
        }
    }
}

/// Navigation state over one dungeon
#[derive(Debug, Clone)]
pub struct Journey {
    current_room_id: RoomId,
    state: JourneyState,
    visible: VisibleSet,
}

impl Journey {
    /// Start in `room_id`, showing it and its doors
    pub fn new(dungeon: &DungeonData, room_id: RoomId) -> Result<Self, JourneyError> {
        if dungeon.room_by_id(room_id).is_none() {
            log::error!("Current room not found: {}", room_id);
            return Err(JourneyError::RoomNotFound(room_id));
        }
        Ok(Self {
            current_room_id: room_id,
            state: JourneyState::Idle,
            visible: VisibleSet::around(dungeon, room_id),
        })
    }

    pub fn current_room_id(&self) -> RoomId {
        self.current_room_id
    }

    pub fn state(&self) -> &JourneyState {
        &self.state
    }

    /// True when a transition was abandoned part way
    pub fn is_interrupted(&self) -> bool {
        matches!(self.state, JourneyState::Transitioning(_))
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Walk through `door_id` into the room on the other side
    ///
    /// Returns the dungeon with door state updated (the door ends closed).
    /// Taking `&mut self` keeps transitions on one journey from overlapping.
    pub async fn move_to_room<A: JourneyActions>(
        &mut self,
        dungeon: &DungeonData,
        door_id: &DoorId,
        actions: &A,
    ) -> Result<DungeonData, JourneyError> {
        let Some(door) = dungeon.door_by_id(door_id).cloned() else {
            log::error!("Door not found: {}", door_id);
            return Err(JourneyError::DoorNotFound(door_id.clone()));
        };

        let from_room_id = self.current_room_id;
        self.state = JourneyState::Transitioning(door_id.clone());

        log::debug!("Opening door {}", door_id);
        let (opened, ()) = futures::join!(
            actions.door_action(door_id, true),
            actions.move_camera(door.position)
        );
        if !opened {
            log::warn!("Door {} did not report opening", door_id);
        }
        let mut dungeon = dungeon.with_door_state(door_id, true);

        let Some(next_room) = dungeon.connecting_room(from_room_id, &door).cloned() else {
            log::error!("Next room not found through door {} from room {}", door_id, from_room_id);
            self.state = JourneyState::Idle;
            return Err(JourneyError::ConnectingRoomNotFound {
                door_id: door_id.clone(),
                room_id: from_room_id,
            });
        };

        // Both rooms are shown while walking between them
        self.visible.extend(VisibleSet::around(&dungeon, next_room.id));

        log::debug!("Moving camera to room {}", next_room.id);
        actions.move_camera(next_room.center()).await;
        self.current_room_id = next_room.id;

        log::debug!("Closing door {}", door_id);
        actions.door_action(door_id, false).await;
        dungeon.set_door_open(door_id, false);

        let unmount: Vec<DoorId> = dungeon
            .room_doors_excluding(from_room_id, next_room.id)
            .into_iter()
            .map(|d| d.id.clone())
            .collect();
        log::debug!("Unmounting room {}", from_room_id);
        actions.unmount_room(from_room_id, &unmount).await;

        self.visible = VisibleSet::around(&dungeon, next_room.id);
        self.state = JourneyState::Idle;

        log::debug!("Moved to room {}", next_room.id);
        Ok(dungeon)
    }
}

/// One-shot transition from `current_room_id`; returns the updated dungeon
/// and the room the journey ended in
pub async fn move_to_room<A: JourneyActions>(
    dungeon: &DungeonData,
    current_room_id: RoomId,
    door_id: &DoorId,
    actions: &A,
) -> Result<(DungeonData, RoomId), JourneyError> {
    let mut journey = Journey::new(dungeon, current_room_id)?;
    let dungeon = journey.move_to_room(dungeon, door_id, actions).await?;
    Ok((dungeon, journey.current_room_id()))
}
