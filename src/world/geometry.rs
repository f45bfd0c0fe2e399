//! Rectangle geometry
//!
//! Axis-aligned areas on an integer pixel grid. Touch tests compare edges
//! exactly; there is no epsilon anywhere in here.

use serde::{Deserialize, Serialize};

/// A point in world space (centres and door anchors can be fractional)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Compass side of a rectangle
///
/// North is towards negative y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::North => Edge::South,
            Edge::East => Edge::West,
            Edge::South => Edge::North,
            Edge::West => Edge::East,
        }
    }

    /// North/South edges run horizontally
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::North | Edge::South)
    }
}

/// Axis-aligned rectangle, half-open on its max edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Area {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Distance between the centres of two areas
    pub fn distance(&self, other: &Area) -> f64 {
        self.center().distance(&other.center())
    }

    /// Strict positive-area intersection
    pub fn overlaps(&self, other: &Area) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Edges coincide with zero gap and the perpendicular spans meet
    ///
    /// Spans that only share an end point still count as touching; the door
    /// size check is what filters those out.
    pub fn touches(&self, other: &Area) -> bool {
        let spans_y = !(self.bottom() < other.y || other.bottom() < self.y);
        let spans_x = !(self.right() < other.x || other.right() < self.x);

        let horizontal = (self.right() == other.x || other.right() == self.x) && spans_y;
        let vertical = (self.bottom() == other.y || other.bottom() == self.y) && spans_x;

        horizontal || vertical
    }

    /// Inclusive on all four bounds
    pub fn contains_point(&self, point: Position) -> bool {
        point.x >= self.x as f64
            && point.x <= self.right() as f64
            && point.y >= self.y as f64
            && point.y <= self.bottom() as f64
    }

    /// Which side of `self` the other area sits flush against, if any
    ///
    /// Checked in North, South, West, East order.
    pub fn touching_edge(&self, other: &Area) -> Option<Edge> {
        if other.bottom() == self.y {
            Some(Edge::North)
        } else if self.bottom() == other.y {
            Some(Edge::South)
        } else if other.right() == self.x {
            Some(Edge::West)
        } else if self.right() == other.x {
            Some(Edge::East)
        } else {
            None
        }
    }

    /// Length of the shared span along `edge`
    pub fn span_overlap(&self, other: &Area, edge: Edge) -> i32 {
        if edge.is_horizontal() {
            self.right().min(other.right()) - self.x.max(other.x)
        } else {
            self.bottom().min(other.bottom()) - self.y.max(other.y)
        }
    }

    /// An area of `width` x `height` placed flush against `edge` of `self`
    pub fn adjacent(&self, edge: Edge, width: i32, height: i32) -> Area {
        match edge {
            Edge::North => Area::new(self.x, self.y - height, width, height),
            Edge::East => Area::new(self.right(), self.y, width, height),
            Edge::South => Area::new(self.x, self.bottom(), width, height),
            Edge::West => Area::new(self.x - width, self.y, width, height),
        }
    }

    /// Shift the area so it lies inside a square world centred on the origin
    pub fn clamped(&self, world_size: i32) -> Area {
        let half = world_size / 2;
        Area::new(
            self.x.max(-half).min(half - self.width),
            self.y.max(-half).min(half - self.height),
            self.width,
            self.height,
        )
    }
}
