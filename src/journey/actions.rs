//! Presentation capabilities a journey drives
//!
//! The journey never touches rendering state. Whoever shows the dungeon
//! hands in an implementation of [`JourneyActions`] and the journey awaits
//! each call before moving on.

use std::time::Duration;

use crate::world::{DoorId, Position, RoomId};

/// Animations the journey waits on during a room transition
#[allow(async_fn_in_trait)]
pub trait JourneyActions {
    /// Animate a door open or closed; `false` if the animation was skipped
    async fn door_action(&self, door_id: &DoorId, open: bool) -> bool;

    /// Move the camera to a world position
    async fn move_camera(&self, position: Position);

    /// Play the exit animation for a room and the listed doors
    async fn unmount_room(&self, room_id: RoomId, door_ids: &[DoorId]) -> bool;
}

/// Actions for running without a renderer: log each call and optionally
/// wait a fixed delay to stand in for animation time
#[derive(Debug, Clone, Default)]
pub struct HeadlessActions {
    pub step_delay: Duration,
}

impl HeadlessActions {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    async fn pause(&self) {
        if !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}

impl JourneyActions for HeadlessActions {
    async fn door_action(&self, door_id: &DoorId, open: bool) -> bool {
        log::info!("{} door {}", if open { "Opening" } else { "Closing" }, door_id);
        self.pause().await;
        true
    }

    async fn move_camera(&self, position: Position) {
        log::info!("Camera to ({:.1}, {:.1})", position.x, position.y);
        self.pause().await;
    }

    async fn unmount_room(&self, room_id: RoomId, door_ids: &[DoorId]) -> bool {
        log::info!("Unmounting room {} with {} door(s)", room_id, door_ids.len());
        self.pause().await;
        true
    }
}
