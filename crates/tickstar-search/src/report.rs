//! Per-cell progress reporting.
//!
//! The engine calls [`CellSink::on_cell_updated`] synchronously for every
//! state transition it makes. Sinks only observe; they never feed back into
//! the search.

use std::fmt;

use tickstar_core::{Cell, CellState, Point};

/// The three metrics attached to a cell when it becomes frontier.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Steps taken from the start.
    pub passed: u32,
    /// Straight-line distance to the goal.
    pub to_goal: f64,
    /// `passed + to_goal`.
    pub total: f64,
}

impl Annotation {
    /// Read the metrics off a cell.
    pub fn of(cell: &Cell) -> Self {
        Self {
            passed: cell.distance_from_start(),
            to_goal: cell.distance_to_goal(),
            total: cell.total_cost(),
        }
    }

    /// The three-line label cell renderers have always shown:
    /// `P:<steps>\nD:<distance>\nT:<total>` with two decimals.
    pub fn legacy(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P:{}\nD:{:.2}\nT:{:.2}",
            self.passed, self.to_goal, self.total
        )
    }
}

/// Receiver of cell transitions.
pub trait CellSink {
    /// Called once per transition, before the engine call that caused it
    /// returns. `annotation` is only present for transitions to
    /// [`CellState::Frontier`].
    fn on_cell_updated(&mut self, pos: Point, state: CellState, annotation: Option<&Annotation>);
}

impl<S: CellSink + ?Sized> CellSink for &mut S {
    #[inline]
    fn on_cell_updated(&mut self, pos: Point, state: CellState, annotation: Option<&Annotation>) {
        (**self).on_cell_updated(pos, state, annotation);
    }
}

impl<S: CellSink + ?Sized> CellSink for Box<S> {
    #[inline]
    fn on_cell_updated(&mut self, pos: Point, state: CellState, annotation: Option<&Annotation>) {
        (**self).on_cell_updated(pos, state, annotation);
    }
}

/// A sink that discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl CellSink for NullSink {
    #[inline]
    fn on_cell_updated(&mut self, _: Point, _: CellState, _: Option<&Annotation>) {}
}

/// One recorded transition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellUpdate {
    pub pos: Point,
    pub state: CellState,
    pub annotation: Option<Annotation>,
}

/// A sink that buffers transitions until drained.
///
/// Hosts that redraw on their own schedule drain it once per tick and
/// repaint only the cells listed.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    updates: Vec<CellUpdate>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions recorded since the last drain.
    pub fn updates(&self) -> &[CellUpdate] {
        &self.updates
    }

    /// Take all buffered transitions, oldest first.
    pub fn drain(&mut self) -> Vec<CellUpdate> {
        std::mem::take(&mut self.updates)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl CellSink for Recorder {
    fn on_cell_updated(&mut self, pos: Point, state: CellState, annotation: Option<&Annotation>) {
        self.updates.push(CellUpdate {
            pos,
            state,
            annotation: annotation.copied(),
        });
    }
}
