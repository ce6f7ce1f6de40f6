//! Step-driven best-first search over a [`Grid`](tickstar_core::Grid).
//!
//! Unlike a batch A* call, a [`Search`] performs exactly one frontier
//! expansion per [`Search::step`] and reports every cell transition to a
//! [`CellSink`] before the call returns. The host decides the cadence: a
//! timer, a game loop, or a test calling [`Search::run`].
//!
//! ```
//! use tickstar_core::{Grid, Point};
//! use tickstar_search::{NullSink, Search, StepResult};
//!
//! let grid = Grid::new(5, 5).unwrap();
//! let mut search = Search::new(grid, Point::new(0, 0), Point::new(4, 4), NullSink).unwrap();
//! assert_eq!(search.run(), StepResult::Reached);
//! assert_eq!(search.reconstruct_path().unwrap().len(), 9);
//! ```

mod config;
mod distance;
mod error;
mod report;
mod search;
mod setup;

pub use config::SearchConfig;
pub use distance::{euclidean, manhattan};
pub use error::SearchError;
pub use report::{Annotation, CellSink, CellUpdate, NullSink, Recorder};
pub use search::{Phase, Search, StepResult};
pub use setup::{ObstacleGen, seeded_rng};
