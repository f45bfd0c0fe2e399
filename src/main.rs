//! Roomweave - Entry Point
//!
//! Headless driver: grows a dungeon from the configured settings, walks a
//! few doors away from the central room, and saves the result to slot 0.

use std::time::Duration;

use anyhow::{Context, Result};

use roomweave::data::GenerationSettings;
use roomweave::journey::{HeadlessActions, Journey};
use roomweave::save::{SaveData, SaveSlots};
use roomweave::world::generate_dungeon;

/// Doors to walk through before stopping
const JOURNEY_STEPS: usize = 5;
/// Stand-in for animation time between journey steps
const STEP_DELAY: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Roomweave v{}", env!("CARGO_PKG_VERSION"));

    let settings = GenerationSettings::load();
    let max_rooms = settings.max_rooms;

    let dungeon = generate_dungeon(settings.generate_options(), |snapshot, generated| {
        log::info!(
            "Progress {:.0}% ({} rooms)",
            roomweave::world::generation::progress_percent(generated, max_rooms),
            snapshot.rooms.len()
        );
    })
    .await;

    let start = dungeon
        .rooms
        .iter()
        .find(|r| r.is_central)
        .map(|r| r.id)
        .context("generated dungeon has no central room")?;

    let mut journey = Journey::new(&dungeon, start)?;
    let actions = HeadlessActions::new(STEP_DELAY);
    let mut dungeon = dungeon;
    let mut previous = None;

    for _ in 0..JOURNEY_STEPS {
        // Prefer a door leading somewhere new
        let here = journey.current_room_id();
        let doors = dungeon.room_doors(here);
        let Some(door) = doors
            .iter()
            .find(|d| d.other_side(here) != previous)
            .or_else(|| doors.first())
            .map(|d| d.id.clone())
        else {
            log::info!("Room {} has no doors; journey ends", here);
            break;
        };

        previous = Some(here);
        dungeon = journey.move_to_room(&dungeon, &door, &actions).await?;
    }

    log::info!(
        "Journey ended in room {} ({} visible doors)",
        journey.current_room_id(),
        journey.visible().doors.len()
    );

    let slots = SaveSlots::default_location();
    slots.save(0, &SaveData::new(dungeon, Some(journey.current_room_id())))?;

    log::info!("Roomweave shut down cleanly");
    Ok(())
}
