//! **tickstar-core**: grid model for step-driven pathfinding.
//!
//! This crate owns storage only: geometry primitives, the per-cell search
//! record, and a fixed-size [`Grid`] with bounds-safe neighbour enumeration.
//! Selection, expansion and termination live in `tickstar-search`.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
