//! Dungeon generation
//!
//! Drives room placement under attempt and failure budgets. Full generation
//! is async: it reports a snapshot every few rooms and yields to the
//! scheduler in between, so a caller can render progress while it runs.

pub mod rooms;
pub mod strategy;

pub use rooms::{central_room, place_room_around, CANVAS_SIZE, WORLD_SIZE};
pub use strategy::StrategyKind;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::rng::Seed;
use crate::world::dungeon::{create_dungeon, DungeonData};
use crate::world::room::{Room, RoomId};

/// Consecutive failed placements before full generation gives up
pub const MAX_CONSECUTIVE_FAILURES: u32 = 50;
/// Successful placements between progress snapshots
pub const PROGRESS_BATCH: u32 = 5;

/// Generation errors
///
/// Failed placements and exhausted budgets are not errors; they just give a
/// smaller dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("dungeon has no generation strategy")]
    MissingStrategy,
    #[error("room {0} not found")]
    RoomNotFound(RoomId),
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

/// Options for full generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Grow this dungeon instead of starting fresh; its seed and stored
    /// strategy take precedence over `seed` and `strategy`
    pub dungeon: Option<DungeonData>,
    /// Rooms to add in this run (the central room is not counted)
    pub max_rooms: u32,
    /// Placement attempts allowed in this run
    pub max_attempts: u32,
    pub max_consecutive_failures: u32,
    pub strategy: StrategyKind,
    /// Starting seed for a fresh dungeon; entropy when `None`
    pub seed: Option<Seed>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            dungeon: None,
            max_rooms: 50,
            max_attempts: 100,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
            strategy: StrategyKind::Random,
            seed: None,
        }
    }
}

impl GenerateOptions {
    /// Fresh dungeon of up to `max_rooms` rooms with twice as many attempts
    pub fn new(seed: Seed, strategy: StrategyKind, max_rooms: u32) -> Self {
        Self {
            max_rooms,
            max_attempts: max_rooms.saturating_mul(2),
            strategy,
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// A progress report from a running generation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub dungeon: DungeonData,
    /// Rooms added so far in this run
    pub generated: u32,
    /// 0-100
    pub percent: f64,
}

/// Share of the room budget used so far, capped at 100
pub fn progress_percent(generated: u32, max_rooms: u32) -> f64 {
    if max_rooms == 0 {
        return 100.0;
    }
    (generated as f64 / max_rooms as f64 * 100.0).min(100.0)
}

/// Grow a dungeon under the given budgets
///
/// `on_progress` sees a snapshot with fresh doors and depth after every
/// [`PROGRESS_BATCH`] placements, and once more at the end unless the last
/// batch already reported the final state. The final snapshot is also the
/// return value. Control goes back to the scheduler after every batch.
pub async fn generate_dungeon<F>(options: GenerateOptions, mut on_progress: F) -> DungeonData
where
    F: FnMut(&DungeonData, u32),
{
    let GenerateOptions {
        dungeon,
        max_rooms,
        max_attempts,
        max_consecutive_failures,
        strategy,
        seed,
    } = options;

    let mut dungeon = dungeon.unwrap_or_else(|| create_dungeon(seed));
    if dungeon.rooms.is_empty() {
        let id = dungeon.next_room_id();
        dungeon.rooms.push(central_room(id));
    }
    let strategy = *dungeon.strategy.get_or_insert(strategy);

    log::debug!(
        "Generating up to {} rooms ({} strategy, seed {})",
        max_rooms,
        strategy,
        dungeon.seed
    );

    let mut attempts = 0;
    let mut generated = 0;
    let mut consecutive_failures = 0;
    let mut last_reported = None;

    while strategy.should_continue(
        attempts,
        max_attempts,
        generated,
        max_rooms,
        consecutive_failures,
        max_consecutive_failures,
    ) {
        attempts += 1;

        let (seed, target) = strategy.select_target_room(dungeon.seed, &dungeon.rooms);
        let target: Room = target.clone();
        let (seed, placed) = place_room_around(&target, &dungeon.rooms, dungeon.id_inc, seed);
        dungeon.seed = seed;

        match placed {
            Some(room) => {
                dungeon.next_room_id();
                dungeon.rooms.push(room);
                generated += 1;
                consecutive_failures = 0;

                if generated % PROGRESS_BATCH == 0 {
                    dungeon.refresh_derived();
                    on_progress(&dungeon, generated);
                    last_reported = Some(generated);
                    tokio::task::yield_now().await;
                }
            }
            None => {
                consecutive_failures += 1;
                if consecutive_failures >= max_consecutive_failures {
                    log::debug!(
                        "Stopping after {} consecutive failed placements",
                        consecutive_failures
                    );
                    break;
                }
            }
        }
    }

    if last_reported != Some(generated) {
        dungeon.refresh_derived();
        on_progress(&dungeon, generated);
    }

    log::info!(
        "Generated {} rooms in {} attempts ({} total, {} doors, max depth {})",
        generated,
        attempts,
        dungeon.rooms.len(),
        dungeon.doors.len(),
        dungeon.max_depth
    );

    dungeon
}

/// Run [`generate_dungeon`] on a worker task, streaming snapshots
///
/// Must be called from inside a tokio runtime. The receiver closes once the
/// worker finishes; the handle yields the final dungeon.
pub fn spawn_generation(
    options: GenerateOptions,
) -> (JoinHandle<DungeonData>, mpsc::UnboundedReceiver<Snapshot>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let max_rooms = options.max_rooms;

    let handle = tokio::spawn(async move {
        generate_dungeon(options, move |dungeon, generated| {
            // Receiver gone just means nobody is watching
            let _ = tx.send(Snapshot {
                dungeon: dungeon.clone(),
                generated,
                percent: progress_percent(generated, max_rooms),
            });
        })
        .await
    });

    (handle, rx)
}

/// Options for growing rooms around one existing room
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    pub target_room_id: RoomId,
    /// Breadth-first levels to grow; level 0 is the target itself
    pub recurse_count: u32,
    /// Rooms to attach to each grown-from room
    pub room_count: u32,
    /// Attempts per grown-from room
    pub max_attempts: u32,
    /// Consecutive failures per grown-from room
    pub max_consecutive_failures: u32,
}

impl ExpandOptions {
    pub fn new(target_room_id: RoomId) -> Self {
        Self {
            target_room_id,
            recurse_count: 1,
            room_count: 3,
            max_attempts: 10,
            max_consecutive_failures: 5,
        }
    }
}

/// Grow rooms around a target, then around those, for `recurse_count` levels
///
/// Each grown-from room gets its own budget. Doors and depth are rebuilt
/// once at the end.
pub fn generate_rooms_around(
    dungeon: &DungeonData,
    options: &ExpandOptions,
) -> Result<DungeonData, GenerationError> {
    let strategy = dungeon.strategy.ok_or(GenerationError::MissingStrategy)?;
    let target = dungeon
        .room_by_id(options.target_room_id)
        .cloned()
        .ok_or(GenerationError::RoomNotFound(options.target_room_id))?;

    let mut next = dungeon.clone();
    let mut level = vec![target];
    let mut added = 0;

    for depth in 0..options.recurse_count {
        let last_level = depth + 1 == options.recurse_count;
        let mut next_level = Vec::new();

        for room in &level {
            let mut attempts = 0;
            let mut generated = 0;
            let mut consecutive_failures = 0;

            while strategy.should_continue(
                attempts,
                options.max_attempts,
                generated,
                options.room_count,
                consecutive_failures,
                options.max_consecutive_failures,
            ) {
                attempts += 1;
                let (seed, placed) = place_room_around(room, &next.rooms, next.id_inc, next.seed);
                next.seed = seed;

                match placed {
                    Some(new_room) => {
                        next.next_room_id();
                        if !last_level {
                            next_level.push(new_room.clone());
                        }
                        next.rooms.push(new_room);
                        generated += 1;
                        consecutive_failures = 0;
                    }
                    None => consecutive_failures += 1,
                }
            }
            added += generated;
        }

        if next_level.is_empty() {
            break;
        }
        level = next_level;
    }

    next.refresh_derived();
    log::debug!(
        "Grew {} rooms around room {} over {} level(s)",
        added,
        options.target_room_id,
        options.recurse_count
    );

    Ok(next)
}
