//! The [`Cell`] record and its [`CellState`] tag.

use std::fmt;

use crate::geom::Point;

/// Search state of a single grid cell.
///
/// Transitions are monotonic: `Empty → Frontier → Closed`, with `Finish`
/// also allowed to become `Frontier`. `Blocked` is terminal and only set
/// before a search starts. `Marked` is applied after the goal is reached,
/// to cells on the reconstructed path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Blocked,
    Start,
    Finish,
    /// Discovered but not yet expanded.
    Frontier,
    /// Fully expanded; never considered again.
    Closed,
    /// Confirmed to lie on the final path.
    Marked,
}

impl CellState {
    /// Single-character glyph for text renderers.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::Finish => 'F',
            Self::Frontier => 'o',
            Self::Closed => 'x',
            Self::Marked => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            '#' => Self::Blocked,
            'S' => Self::Start,
            'F' => Self::Finish,
            'o' => Self::Frontier,
            'x' => Self::Closed,
            '*' => Self::Marked,
            _ => return None,
        })
    }

    /// Whether a search may turn a cell in this state into frontier.
    #[inline]
    pub const fn is_discoverable(self) -> bool {
        matches!(self, Self::Empty | Self::Finish)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Blocked => "blocked",
            Self::Start => "start",
            Self::Finish => "finish",
            Self::Frontier => "frontier",
            Self::Closed => "closed",
            Self::Marked => "marked",
        };
        f.write_str(name)
    }
}

/// One grid cell: its fixed position, its state, and the search metrics.
///
/// `parent` is a coordinate into the same grid, not an owning link, so the
/// discovery tree needs no shared ownership.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) pos: Point,
    pub(crate) state: CellState,
    pub(crate) parent: Option<Point>,
    pub(crate) distance_from_start: u32,
    pub(crate) distance_to_goal: f64,
}

impl Cell {
    pub(crate) const fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            parent: None,
            distance_from_start: 0,
            distance_to_goal: 0.0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// The cell that first discovered this one, if any.
    #[inline]
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    /// Steps from the start along the discovery path.
    #[inline]
    pub fn distance_from_start(&self) -> u32 {
        self.distance_from_start
    }

    /// Straight-line distance to the goal, fixed at discovery time.
    #[inline]
    pub fn distance_to_goal(&self) -> f64 {
        self.distance_to_goal
    }

    /// Evaluation score: `distance_from_start + distance_to_goal`.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        f64::from(self.distance_from_start) + self.distance_to_goal
    }

    /// Drop search state, keeping only position and a `Blocked` tag.
    pub(crate) fn clear(&mut self) {
        if self.state != CellState::Blocked {
            self.state = CellState::Empty;
        }
        self.parent = None;
        self.distance_from_start = 0;
        self.distance_to_goal = 0.0;
    }
}
