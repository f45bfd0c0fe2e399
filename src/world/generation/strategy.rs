//! Room selection strategies
//!
//! A closed set of policies for choosing which room to grow from next. The
//! chosen kind is stored in the dungeon so later expansion keeps scoring the
//! same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rooms::CANVAS_SIZE;
use super::GenerationError;
use crate::rng::{self, Seed};
use crate::world::geometry::Position;
use crate::world::room::{children_count, Room};

/// How many of the best-scored rooms the scored strategies sample from
const TOP_CANDIDATES: usize = 5;
/// Distance from the canvas centre below which the centre term is zero
const CENTER_THRESHOLD: f64 = 200.0;
/// Neighbourhood radius for the density score
const DENSITY_RADIUS: f64 = 150.0;
const IDEAL_DEPTH: f64 = 3.0;

/// Which room-selection policy a dungeon grows with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Uniform over all rooms
    #[default]
    #[serde(rename = "random")]
    Random,
    /// Favour rooms near the canvas boundary and far from the centre
    #[serde(rename = "growth")]
    GrowthDirection,
    /// Favour rooms in sparse neighbourhoods
    #[serde(rename = "type")]
    RoomType,
    /// Favour mid-depth rooms with few children and room to spread
    #[serde(rename = "branch")]
    Branching,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::GrowthDirection,
        StrategyKind::RoomType,
        StrategyKind::Branching,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::GrowthDirection => "growth",
            StrategyKind::RoomType => "type",
            StrategyKind::Branching => "branch",
        }
    }

    /// Pick the room to grow from next; `rooms` must be non-empty
    pub fn select_target_room<'a>(self, seed: Seed, rooms: &'a [Room]) -> (Seed, &'a Room) {
        match self {
            StrategyKind::Random => {
                let (seed, idx) = rng::index(seed, rooms.len());
                (seed, &rooms[idx])
            }
            StrategyKind::GrowthDirection => pick_top(seed, rooms, |room| growth_score(room)),
            StrategyKind::RoomType => pick_top(seed, rooms, |room| density_score(room, rooms)),
            StrategyKind::Branching => pick_top(seed, rooms, |room| branch_score(room, rooms)),
        }
    }

    /// Shared continuation rule for every strategy
    pub fn should_continue(
        self,
        attempts: u32,
        max_attempts: u32,
        generated: u32,
        max_rooms: u32,
        consecutive_failures: u32,
        max_consecutive_failures: u32,
    ) -> bool {
        attempts < max_attempts
            && generated < max_rooms
            && consecutive_failures < max_consecutive_failures
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenerationError::UnknownStrategy(s.to_string()))
    }
}

/// Sort rooms by descending score (stable, so ties keep growth order) and
/// sample uniformly among the best few
fn pick_top<'a, F>(seed: Seed, rooms: &'a [Room], score: F) -> (Seed, &'a Room)
where
    F: Fn(&Room) -> f64,
{
    let mut scored: Vec<(f64, &Room)> = rooms.iter().map(|r| (score(r), r)).collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let candidates = scored.len().min(TOP_CANDIDATES);
    let (seed, idx) = rng::index(seed, candidates);
    (seed, scored[idx].1)
}

fn canvas_center() -> Position {
    let c = CANVAS_SIZE as f64 / 2.0;
    Position::new(c, c)
}

/// Distance-from-centre term shared by the scored strategies
fn center_score(room: &Room) -> f64 {
    (room.center().distance(&canvas_center()) - CENTER_THRESHOLD).max(0.0)
}

fn growth_score(room: &Room) -> f64 {
    let a = &room.area;
    let frontier = a
        .x
        .min(CANVAS_SIZE - a.right())
        .min(a.y)
        .min(CANVAS_SIZE - a.bottom()) as f64;

    let edge_score = (100.0 - frontier).max(0.0);
    edge_score + center_score(room) * 0.5
}

fn density_score(room: &Room, all: &[Room]) -> f64 {
    let nearby = all
        .iter()
        .filter(|other| other.id != room.id && room.area.distance(&other.area) < DENSITY_RADIUS)
        .count() as f64;

    let sparse = (5.0 - nearby).max(0.0);
    sparse * 2.0 + center_score(room) * 0.5
}

fn branch_score(room: &Room, all: &[Room]) -> f64 {
    let depth_score = (1.0 - (room.depth as f64 - IDEAL_DEPTH).abs()).max(0.0);

    // Full penalty once a room has four children
    let children = (children_count(all, room.id) as f64).min(4.0);
    let children_score = 1.0 - children / 4.0;

    depth_score * 2.0 + children_score * 3.0 + spacing_score(room, all)
}

/// Distance to the nearest room outside this room's sibling group, capped at 1
fn spacing_score(room: &Room, all: &[Room]) -> f64 {
    let center = room.center();
    let nearest = all
        .iter()
        .filter(|other| other.id != room.id && other.parent_id != room.parent_id)
        .map(|other| other.center().distance(&center))
        .fold(f64::INFINITY, f64::min);

    (nearest / 200.0).min(1.0)
}
